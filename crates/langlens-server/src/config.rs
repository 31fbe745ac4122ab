//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::Parser;

/// Server options. Port and CORS origins can also come from the
/// environment, matching how deployments configure this service.
#[derive(Debug, Parser)]
#[command(name = "langlens", version, about = "Programming-language detection API")]
pub struct ServerArgs {
    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Comma-separated list of origins allowed to call the API.
    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// Directory containing vectorizer.json, classifier.onnx, and labels.json.
    #[arg(long, default_value = "models")]
    pub models_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployment_contract() {
        let args = ServerArgs::parse_from(["langlens"]);
        assert_eq!(args.host, "0.0.0.0");
        assert_eq!(args.port, 8000);
        assert_eq!(args.allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(args.models_dir, PathBuf::from("models"));
    }

    #[test]
    fn origins_split_on_commas() {
        let args = ServerArgs::parse_from([
            "langlens",
            "--allowed-origins",
            "http://localhost:3000,https://app.example.com",
        ]);
        assert_eq!(
            args.allowed_origins,
            vec!["http://localhost:3000", "https://app.example.com"]
        );
    }

    #[test]
    fn port_flag_overrides_default() {
        let args = ServerArgs::parse_from(["langlens", "--port", "9001"]);
        assert_eq!(args.port, 9001);
    }
}
