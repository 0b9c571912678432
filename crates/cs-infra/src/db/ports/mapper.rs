use anyhow::Result;

/// Domain value to insertable row. Fails when the value cannot be represented.
pub trait InsertMapper<D, R>: Sync + Send {
    fn to_row(&self, domain: &D) -> Result<R>;
}

/// Stored row back to the domain. Fails on rows that break domain invariants.
pub trait RowMapper<R, D>: Sync + Send {
    fn to_domain(&self, row: &R) -> Result<D>;
}
