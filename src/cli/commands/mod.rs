mod init;
mod show_config;

pub use init::cmd_init;
pub use show_config::cmd_show_config;
