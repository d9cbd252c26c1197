use serde_yaml::Value;
use sfconfig::Config;
use tempfile::TempDir;

fn load(dir: &TempDir) -> Config {
    Config::load_config(dir.path().to_str().unwrap()).unwrap()
}

#[test]
fn test_defaults_are_loaded_and_saved() {
    let dir = tempfile::tempdir().unwrap();
    let config = load(&dir);

    assert_eq!(config.get_http_port(), 5050);
    assert_eq!(config.get_base_url(), "localhost");
    assert_eq!(config.get_log_min_level().unwrap(), "INFO");
    assert_eq!(config.get_log_cache_size().unwrap(), 1000);
    assert!(config.get_log_enable_console().unwrap());

    // Le fichier fusionné est écrit dans le répertoire
    assert!(dir.path().join("config.yaml").exists());
}

#[test]
fn test_external_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.yaml"),
        "HOST:\n  HTTP_PORT: 8181\nnowplaying:\n  album_size: 200\n",
    )
    .unwrap();

    let config = load(&dir);

    assert_eq!(config.get_http_port(), 8181);
    assert_eq!(
        config.get_value(&["nowplaying", "album_size"]).unwrap(),
        Value::Number(200.into())
    );
    // Les clés absentes du fichier gardent la valeur embarquée
    assert_eq!(
        config.get_value(&["nowplaying", "stopped_policy"]).unwrap(),
        Value::String("retain".into())
    );
}

#[test]
fn test_setter_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    {
        let config = load(&dir);
        config.set_http_port(9000).unwrap();
        config.set_log_min_level("DEBUG".to_string()).unwrap();
    }

    let reloaded = load(&dir);
    assert_eq!(reloaded.get_http_port(), 9000);
    assert_eq!(reloaded.get_log_min_level().unwrap(), "DEBUG");
}

#[test]
fn test_missing_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = load(&dir);

    assert!(config.get_value(&["does", "not", "exist"]).is_err());
    assert_eq!(config.get_string(&["spotify", "client_id"]), None);
}

#[test]
fn test_invalid_port_falls_back_to_default() {
    let dir = tempfile::tempdir().unwrap();
    let config = load(&dir);

    config
        .set_value(&["host", "http_port"], Value::String("not-a-port".into()))
        .unwrap();
    assert_eq!(config.get_http_port(), 5050);

    config
        .set_value(&["host", "http_port"], Value::Number(70000.into()))
        .unwrap();
    assert_eq!(config.get_http_port(), 5050);
}

#[test]
fn test_env_override_is_applied() {
    // Section propre à ce test : l'environnement est partagé par tout le processus
    std::env::set_var("SPOTIFRAME_CONFIG__ENVTEST__STOPPED_POLICY", "clear");
    std::env::set_var("SPOTIFRAME_CONFIG__ENVTEST__ALBUM_SIZE", "300");

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.yaml"),
        "envtest:\n  stopped_policy: retain\n  album_size: 420\n",
    )
    .unwrap();
    let config = load(&dir);

    // L'environnement l'emporte sur le fichier, les valeurs sont typées
    assert_eq!(
        config.get_value(&["envtest", "stopped_policy"]).unwrap(),
        Value::String("clear".into())
    );
    assert_eq!(
        config.get_value(&["envtest", "album_size"]).unwrap(),
        Value::Number(300.into())
    );

    // Et la valeur surchargée est persistée
    let saved = std::fs::read_to_string(dir.path().join("config.yaml")).unwrap();
    assert!(saved.contains("stopped_policy: clear"));

    std::env::remove_var("SPOTIFRAME_CONFIG__ENVTEST__STOPPED_POLICY");
    std::env::remove_var("SPOTIFRAME_CONFIG__ENVTEST__ALBUM_SIZE");
}
