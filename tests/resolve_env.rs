use std::env;

use serial_test::serial;

use daylog::load_config::{
    resolve_env, DEFAULT_API_BASE, DEFAULT_HUB_REPO, DEFAULT_MEMBER_ID, DEFAULT_TEAM_DIR,
};
use daylog_core::publish::remote_log_path;

fn clear_identity_env() {
    env::remove_var("MEMBER_ID");
    env::remove_var("TEAM_DIR");
    env::remove_var("HUB_REPO");
    env::remove_var("HUB_API_BASE");
}

#[test]
#[serial]
fn defaults_apply_when_env_unset() {
    clear_identity_env();

    let config = resolve_env();
    assert_eq!(config.member_id, DEFAULT_MEMBER_ID);
    assert_eq!(config.team_dir, DEFAULT_TEAM_DIR);
    assert_eq!(config.hub.repo, DEFAULT_HUB_REPO);
    assert_eq!(config.hub.api_base, DEFAULT_API_BASE);
    assert_eq!(config.hub.branch, "main");

    // The defaults appear verbatim in the constructed remote path.
    let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 2).expect("valid date");
    assert_eq!(
        remote_log_path(&config.team_dir, &config.member_id, date),
        "成员日志 members/中国团队 china-team/金倩如/2025-01-02_log.md"
    );
}

#[test]
#[serial]
fn env_values_override_defaults() {
    clear_identity_env();
    env::set_var("MEMBER_ID", "张三");
    env::set_var("TEAM_DIR", "欧洲团队 europe-team");
    env::set_var("HUB_REPO", "AIEC-Team/other-hub");
    env::set_var("HUB_API_BASE", "https://github.example.com/api/v3");

    let config = resolve_env();
    assert_eq!(config.member_id, "张三");
    assert_eq!(config.team_dir, "欧洲团队 europe-team");
    assert_eq!(config.hub.repo, "AIEC-Team/other-hub");
    assert_eq!(config.hub.api_base, "https://github.example.com/api/v3");

    clear_identity_env();
}

#[test]
#[serial]
fn blank_values_fall_back_to_defaults() {
    clear_identity_env();
    env::set_var("MEMBER_ID", "   ");
    env::set_var("TEAM_DIR", "");

    let config = resolve_env();
    assert_eq!(config.member_id, DEFAULT_MEMBER_ID);
    assert_eq!(config.team_dir, DEFAULT_TEAM_DIR);

    clear_identity_env();
}
