use std::{path::PathBuf, time::Duration};
use url::Url;

pub trait Configuration: Clone + Send + Sync + 'static {
    fn password(&self) -> String;
    fn port(&self) -> String;
    fn follow_directory_url(&self) -> Option<Url>;
    fn follow_directory_token(&self) -> Option<String>;
    fn lookup_timeout(&self) -> Duration;
    fn download_dir(&self) -> PathBuf;
}
