#![forbid(unsafe_code)]

use hex_glow::config::GlowConfig;

fn main() -> Result<(), pixels::Error> {
    env_logger::init();
    hex_glow::run(GlowConfig::read_config_from_env())
}
