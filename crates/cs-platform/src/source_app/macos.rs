use cs_core::clipboard::SourceApp;
use objc::runtime::{Class, Object};
use objc::{msg_send, sel, sel_impl};

pub(super) fn frontmost_app() -> Option<SourceApp> {
    unsafe {
        let workspace_class = Class::get("NSWorkspace")?;
        let workspace: *mut Object = msg_send![workspace_class, sharedWorkspace];
        if workspace.is_null() {
            return None;
        }

        let app: *mut Object = msg_send![workspace, frontmostApplication];
        if app.is_null() {
            return None;
        }

        let bundle_id = get_nsstring(msg_send![app, bundleIdentifier]);
        let name = get_nsstring(msg_send![app, localizedName]);
        if bundle_id.is_none() && name.is_none() {
            return None;
        }

        Some(SourceApp { bundle_id, name })
    }
}

unsafe fn get_nsstring(nsstring: *mut Object) -> Option<String> {
    if nsstring.is_null() {
        return None;
    }

    let utf8: *const std::os::raw::c_char = msg_send![nsstring, UTF8String];
    if utf8.is_null() {
        return None;
    }

    std::ffi::CStr::from_ptr(utf8)
        .to_str()
        .ok()
        .map(|s| s.to_string())
}
