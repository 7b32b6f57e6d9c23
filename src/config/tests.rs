use super::load::{default_config_path, default_data_dir, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_playdeck_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("PLAYDECK_CONFIG_PATH", "/tmp/playdeck-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/playdeck-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("playdeck")
            .join("config.toml")
    );
}

#[test]
fn default_paths_fall_back_to_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::remove("XDG_DATA_HOME");
    let _g3 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir/.config/playdeck/config.toml")
    );
    assert_eq!(
        default_data_dir().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir/.local/share/playdeck")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
loop_mode = "no-loop"
auto_advance = false

[audio]
enabled = false
volume = 0.5
quit_fade_out_ms = 0

[ui]
header_text = "hello"
notice_ttl_ms = 1500
max_notices = 2
mouse = false

[actions]
downloads_dir = "/tmp/playdeck-downloads"

[logging]
dir = "/tmp/playdeck-logs"
filter = "playdeck=debug"

[library]
extensions = ["mp3"]
recursive = false
include_hidden = true
follow_links = false
catalog_path = "/tmp/catalog.json"
display_fields = ["title", "album"]
display_separator = "::"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("PLAYDECK_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("PLAYDECK__AUDIO__VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.loop_mode, LoopModeSetting::NoLoop);
    assert!(!s.playback.auto_advance);
    assert!(!s.audio.enabled);
    assert_eq!(s.audio.volume, 0.5);
    assert_eq!(s.audio.quit_fade_out_ms, 0);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.notice_ttl_ms, 1500);
    assert_eq!(s.ui.max_notices, 2);
    assert!(!s.ui.mouse);
    assert_eq!(
        s.actions.downloads_dir.as_deref(),
        Some(std::path::Path::new("/tmp/playdeck-downloads"))
    );
    assert_eq!(s.logging.dir, std::path::PathBuf::from("/tmp/playdeck-logs"));
    assert_eq!(s.logging.filter, "playdeck=debug");
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.recursive);
    assert!(s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(
        s.library.catalog_path.as_deref(),
        Some(std::path::Path::new("/tmp/catalog.json"))
    );
    assert_eq!(
        s.library.display_fields,
        vec![TrackDisplayField::Title, TrackDisplayField::Album]
    );
    assert_eq!(s.library.display_separator, "::");
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[ui]
notice_ttl_ms = 1000
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("PLAYDECK_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("PLAYDECK__UI__NOTICE_TTL_MS", "42");

    let s = Settings::load().unwrap();
    assert_eq!(s.ui.notice_ttl_ms, 42);
}

#[test]
fn loop_mode_accepts_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(&cfg_path, "[playback]\nloop_mode = \"loop-around\"\n").unwrap();

    let _g1 = EnvGuard::set("PLAYDECK_CONFIG_PATH", cfg_path.to_str().unwrap());
    let s = Settings::load().unwrap();
    assert_eq!(s.playback.loop_mode, LoopModeSetting::LoopAll);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.audio.volume = 1.5;
    assert!(s.validate().is_err());

    s.audio.volume = 1.0;
    s.ui.max_notices = 0;
    assert!(s.validate().is_err());

    s.ui.max_notices = 1;
    s.library.max_depth = Some(0);
    assert!(s.validate().is_err());
}
