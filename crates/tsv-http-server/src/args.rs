use clap::{Parser, ValueEnum};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scheme {
    Http,
    Https,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Http => f.write_str("http"),
            Scheme::Https => f.write_str("https"),
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "tsv-http-server", about = "Serve a TabSeparated file over HTTP(S)")]
pub struct ServerArgs {
    /// File to serve
    #[arg(long, env = "TSV_DATA_PATH")]
    pub data_path: PathBuf,

    #[arg(long, value_enum, default_value_t = Scheme::Http)]
    pub scheme: Scheme,

    /// Host name or address to listen on
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, default_value_t = 5555)]
    pub port: u16,

    /// PEM file with both the certificate and its private key (HTTPS only)
    #[arg(long, env = "TSV_CERT_PATH")]
    pub cert_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_command_line() {
        let args = ServerArgs::try_parse_from([
            "tsv-http-server",
            "--data-path=/t.tsv",
            "--scheme=https",
            "--host=clickhouse1",
            "--port=5556",
            "--cert-path=/fake_cert.pem",
        ])
        .unwrap();
        assert_eq!(args.data_path, PathBuf::from("/t.tsv"));
        assert_eq!(args.scheme, Scheme::Https);
        assert_eq!(args.host, "clickhouse1");
        assert_eq!(args.port, 5556);
        assert_eq!(args.cert_path, Some(PathBuf::from("/fake_cert.pem")));
    }

    #[test]
    fn test_rejects_unknown_scheme() {
        assert!(ServerArgs::try_parse_from([
            "tsv-http-server",
            "--data-path=/t.tsv",
            "--scheme=ftp",
        ])
        .is_err());
    }
}
