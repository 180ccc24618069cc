#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };
    let catalog = lark_auth_scope::builtin_catalog();
    if let Ok(Some(requirements)) = catalog.requirements_for_command(raw) {
        assert!(requirements
            .services
            .windows(2)
            .all(|pair| pair[0] < pair[1]));
    }
    let services = raw.split(',').collect::<Vec<_>>();
    let _ = catalog.suggested_user_oauth_scopes_from_services(&services, raw.len() % 2 == 0);
    let _ = catalog.user_oauth_scopes_from_services(&services, false, "");
});
