use std::env;
use std::sync::{Mutex, OnceLock};

use ledsync_core::error::Domain;
use ledsync_gpio_node::config::{
    Config, DEFAULT_ACTIVE_LEDS_TOPIC, DEFAULT_BRIDGE_URL, DEFAULT_NODE_NAME,
    DEFAULT_SUCCESS_TOPIC, ENV_BRIDGE_URL, ENV_GPIO_DELAY, ENV_GPIO_LINE_FINAL,
};

const ALL_ENV: [&str; 8] = [
    "LEDSYNC_NODE_NAME",
    "LEDSYNC_BRIDGE_URL",
    "LEDSYNC_GPIO_CHIP",
    "LEDSYNC_GPIO_DELAY",
    "LEDSYNC_GPIO_LINE_INTERMEDIATE",
    "LEDSYNC_GPIO_LINE_FINAL",
    "LEDSYNC_ACTIVE_LEDS_TOPIC",
    "LEDSYNC_SUCCESS_TOPIC",
];

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let guard = LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poison| poison.into_inner());
    for key in ALL_ENV {
        env::remove_var(key);
    }
    guard
}

#[test]
fn defaults_without_args_or_env() {
    let _guard = env_lock();

    let config = Config::from_args_iter(["bin"]).unwrap();
    assert_eq!(config.node_name, DEFAULT_NODE_NAME);
    assert_eq!(config.bridge_url, DEFAULT_BRIDGE_URL);
    assert_eq!(config.gpio_chip, "/dev/gpiochip0");
    assert_eq!(config.active_leds_topic, DEFAULT_ACTIVE_LEDS_TOPIC);
    assert_eq!(config.success_topic, DEFAULT_SUCCESS_TOPIC);
    assert_eq!(config.params.gpio_delay, 0.2);
    assert_eq!(config.params.intermediate_line, 85);
    assert_eq!(config.params.final_line, 144);
}

#[test]
fn flags_accept_both_spellings() {
    let _guard = env_lock();

    let config = Config::from_args_iter([
        "bin",
        "--gpio-delay",
        "0.5",
        "--gpio-line-intermediate=12",
        "--gpio-line-final",
        "13",
        "--success-topic=/detections",
    ])
    .unwrap();

    assert_eq!(config.params.gpio_delay, 0.5);
    assert_eq!(config.params.intermediate_line, 12);
    assert_eq!(config.params.final_line, 13);
    assert_eq!(config.success_topic, "/detections");
}

#[test]
fn flag_overrides_env_which_overrides_default() {
    let _guard = env_lock();
    env::set_var(ENV_BRIDGE_URL, "ws://robot:9090");
    env::set_var(ENV_GPIO_LINE_FINAL, "150");

    let config = Config::from_args_iter(["bin", "--gpio-line-final", "151"]).unwrap();
    assert_eq!(config.bridge_url, "ws://robot:9090");
    assert_eq!(config.params.final_line, 151);

    env::remove_var(ENV_BRIDGE_URL);
    env::remove_var(ENV_GPIO_LINE_FINAL);
}

#[test]
fn bad_numbers_are_config_errors() {
    let _guard = env_lock();

    let err = Config::from_args_iter(["bin", "--gpio-delay", "fast"]).unwrap_err();
    assert_eq!(err.domain, Domain::Config);

    let err = Config::from_args_iter(["bin", "--gpio-delay=-0.1"]).unwrap_err();
    assert_eq!(err.domain, Domain::Config);

    env::set_var(ENV_GPIO_DELAY, "nope");
    assert!(Config::from_args_iter(["bin"]).is_err());
    env::remove_var(ENV_GPIO_DELAY);
}

#[test]
fn missing_flag_value_is_rejected() {
    let _guard = env_lock();

    let err = Config::from_args_iter(["bin", "--gpio-line-final"]).unwrap_err();
    assert!(err.message.contains("requires a value"));
}

#[test]
fn unknown_flags_are_ignored() {
    let _guard = env_lock();

    let config = Config::from_args_iter(["bin", "--verbose", "--node-name", "leds"]).unwrap();
    assert_eq!(config.node_name, "leds");
}

#[test]
fn launch_file_ros_params_are_applied() {
    let _guard = env_lock();

    let config = Config::from_args_iter([
        "bin",
        "--ros-args",
        "-p",
        "gpio_delay:=0.5",
        "-p",
        "gpio_line_85:=12",
        "--param",
        "gpio_line_144:=13",
        "-r",
        "__node:=leds",
        "-p",
        "use_sim_time:=false",
    ])
    .unwrap();

    assert_eq!(config.params.gpio_delay, 0.5);
    assert_eq!(config.params.intermediate_line, 12);
    assert_eq!(config.params.final_line, 13);
    assert_eq!(config.node_name, "leds");
}

#[test]
fn ros_args_section_ends_at_double_dash() {
    let _guard = env_lock();

    let config = Config::from_args_iter([
        "bin",
        "--ros-args",
        "-p",
        "gpio_delay:=0.5",
        "--",
        "--gpio-delay",
        "0.3",
    ])
    .unwrap();
    assert_eq!(config.params.gpio_delay, 0.3);

    let err = Config::from_args_iter(["bin", "--ros-args", "-p", "gpio_line_85:=x"]).unwrap_err();
    assert_eq!(err.domain, Domain::Config);

    let err = Config::from_args_iter(["bin", "--ros-args", "-p"]).unwrap_err();
    assert!(err.message.contains("requires a name:=value"));
}
