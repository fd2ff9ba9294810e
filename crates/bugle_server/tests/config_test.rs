//! Tests for the configuration surface.

use bugle_server::{
    ChatConfig, CommandConfig, CommandsConfig, Config, OncallConfig, ServerConfig, TimelogConfig,
    TrackerConfig,
};

#[test]
fn test_server_config_defaults() {
    let server = ServerConfig::default();
    assert_eq!(server.host(), "0.0.0.0");
    assert_eq!(*server.port(), 8080);
}

#[test]
fn test_server_config_builder() {
    let server = ServerConfig::builder()
        .host("127.0.0.1".to_string())
        .port(9090)
        .build();

    assert_eq!(server.host(), "127.0.0.1");
    assert_eq!(*server.port(), 9090);
}

#[test]
fn test_chat_config_builder() {
    let chat = ChatConfig::builder()
        .token("xoxb-secret".to_string())
        .broadcast_channel("C-duty".to_string())
        .build();

    assert_eq!(chat.token(), "xoxb-secret");
    assert_eq!(chat.broadcast_channel(), "C-duty");
    assert!(chat.base_url().is_none());
}

#[test]
fn test_oncall_config_builder() {
    let oncall = OncallConfig::builder()
        .api_key("genie-key".to_string())
        .schedule_id("rota-1".to_string())
        .base_url(Some("http://localhost:9999".to_string()))
        .build();

    assert_eq!(oncall.api_key(), "genie-key");
    assert_eq!(oncall.schedule_id(), "rota-1");
    assert_eq!(oncall.base_url().as_deref(), Some("http://localhost:9999"));
}

#[test]
fn test_command_config_ttl_default() {
    let duty = CommandConfig::builder().token("d".to_string()).build();
    assert_eq!(*duty.cache_ttl_secs(), 60);

    let timelogs = TimelogConfig::builder().token("l".to_string()).build();
    assert_eq!(*timelogs.cache_ttl_secs(), 60);
    assert_eq!(*timelogs.minimum_minutes(), 360);
}

#[test]
fn test_config_builder_with_defaults() {
    let config = Config::builder()
        .daily_call_time("08:45".to_string())
        .chat(
            ChatConfig::builder()
                .token("xoxb-secret".to_string())
                .broadcast_channel("C-duty".to_string())
                .build(),
        )
        .oncall(
            OncallConfig::builder()
                .api_key("genie-key".to_string())
                .schedule_id("rota-1".to_string())
                .build(),
        )
        .tracker(
            TrackerConfig::builder()
                .base_url("https://tracker.example.com".to_string())
                .token("tracker-secret".to_string())
                .build(),
        )
        .commands(
            CommandsConfig::builder()
                .duty(CommandConfig::builder().token("d".to_string()).build())
                .timelogs(TimelogConfig::builder().token("l".to_string()).build())
                .build(),
        )
        .build();

    assert_eq!(config.server().host(), "0.0.0.0"); // Default
    assert_eq!(*config.server().port(), 8080); // Default
    assert!(config.team().is_empty()); // Default

    let call_time = config.call_time().unwrap();
    assert_eq!(call_time.hour(), 8);
    assert_eq!(call_time.minute(), 45);
}

#[test]
fn test_config_from_sample_file() {
    let config = Config::from_file("examples/bugle.toml").expect("Failed to load config");

    assert_eq!(config.daily_call_time(), "09:30");
    assert_eq!(config.server().host(), "0.0.0.0");
    assert_eq!(*config.server().port(), 8080);
    assert_eq!(config.chat().broadcast_channel(), "C024BE91L");
    assert!(config.chat().base_url().is_none());
    assert_eq!(config.oncall().schedule_id(), "sched-primary");
    assert_eq!(config.tracker().base_url(), "https://tracker.example.com");
    assert_eq!(*config.commands().duty().cache_ttl_secs(), 60);
    assert_eq!(*config.commands().timelogs().cache_ttl_secs(), 120);
    assert_eq!(*config.commands().timelogs().minimum_minutes(), 360);

    assert_eq!(config.team().len(), 2);
    assert_eq!(config.team()[0].name, "Alice Cooper");
    assert_eq!(config.team()[0].chat_login, "alice");
    assert_eq!(config.team()[1].tracker_login, "bdylan");

    let call_time = config.call_time().unwrap();
    assert_eq!(call_time.hour(), 9);
    assert_eq!(call_time.minute(), 30);
}
