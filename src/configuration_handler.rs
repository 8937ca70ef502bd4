use crate::configuration::Configuration;
use clap::Parser;
use std::{path::PathBuf, time::Duration};
use url::Url;

#[derive(Debug, Clone, Parser)]
#[command(version, about = "Tutoring slot booking and follow list service")]
pub struct ConfigurationHandler {
    /// Password expected in the `x-admin-password` header of admin requests
    #[arg(long, env = "ADMIN_PASSWORD")]
    password: String,

    #[arg(long, env = "PORT", default_value = "3000")]
    port: String,

    /// Base url of the remote follow directory. Without it an in-memory
    /// directory with example students is used.
    #[arg(long, env = "FOLLOW_DIRECTORY_URL")]
    follow_directory_url: Option<Url>,

    #[arg(long, env = "FOLLOW_DIRECTORY_TOKEN")]
    follow_directory_token: Option<String>,

    #[arg(long, env = "LOOKUP_TIMEOUT_SECS", default_value_t = 10)]
    lookup_timeout_secs: u64,

    #[arg(long, env = "DOWNLOAD_DIR", default_value = "downloads")]
    download_dir: PathBuf,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        // A missing .env file is fine, the environment may be set otherwise.
        let _ = dotenvy::dotenv();
        Self::parse()
    }
}

impl Configuration for ConfigurationHandler {
    fn password(&self) -> String {
        self.password.clone()
    }

    fn port(&self) -> String {
        self.port.clone()
    }

    fn follow_directory_url(&self) -> Option<Url> {
        self.follow_directory_url.clone()
    }

    fn follow_directory_token(&self) -> Option<String> {
        self.follow_directory_token.clone()
    }

    fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }

    fn download_dir(&self) -> PathBuf {
        self.download_dir.clone()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_all_arguments() {
        let configuration = ConfigurationHandler::try_parse_from([
            "tutor_booking",
            "--password",
            "secret",
            "--port",
            "8080",
            "--follow-directory-url",
            "https://tutoring.firebaseio.com/",
            "--follow-directory-token",
            "token",
            "--lookup-timeout-secs",
            "3",
            "--download-dir",
            "/tmp/attachments",
        ])
        .unwrap();

        assert_eq!(configuration.password(), "secret");
        assert_eq!(configuration.port(), "8080");
        assert_eq!(
            configuration.follow_directory_url().unwrap().as_str(),
            "https://tutoring.firebaseio.com/"
        );
        assert_eq!(configuration.follow_directory_token().as_deref(), Some("token"));
        assert_eq!(configuration.lookup_timeout(), Duration::from_secs(3));
        assert_eq!(configuration.download_dir(), PathBuf::from("/tmp/attachments"));
    }

    #[test]
    fn test_invalid_follow_directory_url_is_rejected() {
        let result = ConfigurationHandler::try_parse_from([
            "tutor_booking",
            "--password",
            "secret",
            "--follow-directory-url",
            "not a url",
        ]);
        assert!(result.is_err());
    }
}
