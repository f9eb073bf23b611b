use super::*;

// =============================================================================
// env_bool — uses unique env var names to avoid races with parallel tests.
// =============================================================================

#[test]
fn env_bool_true_variants() {
    for (i, val) in ["1", "true", "yes", "on", "TRUE", "On"].iter().enumerate() {
        let key = format!("__TEST_EB_TRUE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(true), "expected true for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_false_variants() {
    for (i, val) in ["0", "false", "no", "off"].iter().enumerate() {
        let key = format!("__TEST_EB_FALSE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(false), "expected false for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_whitespace_trimmed() {
    let key = "__TEST_EB_WS_104__";
    unsafe { std::env::set_var(key, "  yes  ") };
    assert_eq!(env_bool(key), Some(true));
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_bool_invalid_or_unset_returns_none() {
    let key = "__TEST_EB_INVALID_105__";
    unsafe { std::env::set_var(key, "maybe") };
    assert_eq!(env_bool(key), None);
    unsafe { std::env::remove_var(key) };
    assert_eq!(env_bool("__TEST_EB_SURELY_UNSET_106__"), None);
}

// =============================================================================
// env_parse
// =============================================================================

#[test]
fn env_parse_falls_back_on_garbage() {
    let key = "__TEST_EP_GARBAGE_201__";
    unsafe { std::env::set_var(key, "not-a-port") };
    assert_eq!(env_parse(key, 3000_u16), 3000);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_parse_reads_value() {
    let key = "__TEST_EP_VALUE_202__";
    unsafe { std::env::set_var(key, " 8080 ") };
    assert_eq!(env_parse(key, 3000_u16), 8080);
    unsafe { std::env::remove_var(key) };
}

// =============================================================================
// SupabaseConfig — env manipulation requires unsafe in edition 2024.
// =============================================================================

// The shared SUPABASE_* vars are only touched by this one test.
#[test]
fn supabase_from_env_reads_and_normalizes() {
    unsafe {
        std::env::set_var("SUPABASE_URL", " https://project.supabase.co/ ");
        std::env::set_var("SUPABASE_ANON_KEY", "anon");
        std::env::remove_var("SUPABASE_TIMEOUT_SECS");
    }
    let cfg = SupabaseConfig::from_env();
    assert_eq!(cfg.url, "https://project.supabase.co");
    assert_eq!(cfg.anon_key, "anon");
    assert_eq!(cfg.timeout_secs, DEFAULT_SUPABASE_TIMEOUT_SECS);
    assert!(cfg.is_configured());

    unsafe {
        std::env::remove_var("SUPABASE_URL");
        std::env::remove_var("SUPABASE_ANON_KEY");
    }
    let cfg = SupabaseConfig::from_env();
    assert!(!cfg.has_url());
    assert!(!cfg.has_key());
    assert!(!cfg.is_configured());
}

#[test]
fn supabase_partial_config_is_not_configured() {
    let cfg = SupabaseConfig { url: "https://x.supabase.co".into(), anon_key: String::new(), timeout_secs: 5 };
    assert!(cfg.has_url());
    assert!(!cfg.has_key());
    assert!(!cfg.is_configured());
}
