//! Utility module for terabox-history.

mod paths;

pub use paths::{
    config_dir, data_dir, global_config_file, local_config_file, storage_file, APP_DIR,
    LOCAL_CONFIG_NAME,
};
