use std::collections::BTreeMap;

use clap::{Parser, Subcommand};
use serde_json::Value;

use fileops_server::forward::ForwardRequest;

#[derive(Parser)]
#[command(name = "fileops-cli")]
#[command(about = "Command-line client for the file operations service", long_about = None)]
struct Cli {
    #[arg(short, long, env = "FILEOPS_URL", default_value = "http://localhost:8081")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a file, creating parent directories
    Write {
        path: String,
        /// Content to write (empty when omitted)
        #[arg(default_value = "")]
        content: String,
    },
    /// Print a file's contents
    Read { path: String },
    /// List a directory with sizes
    List { dir: String },
    /// Delete a file or empty directory
    Delete { path: String },
    /// Fill a directory with generated files
    Generate {
        dir: String,
        /// Total size in megabytes
        size_mb: u64,
    },
    /// Have the service issue an HTTP request
    Proxy {
        target: String,
        #[arg(short = 'X', long, default_value = "GET")]
        method: String,
        /// Header as "Name: value"; repeatable
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
        #[arg(short, long)]
        data: Option<String>,
        /// Seconds
        #[arg(short, long)]
        timeout: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Write { path, content } => {
            client
                .post(format!("{base}/writeFile"))
                .form(&[("filePath", path), ("fileContent", content)])
                .send()
                .await?
        }
        Commands::Read { path } => {
            client
                .get(format!("{base}/readFile"))
                .query(&[("filePath", path)])
                .send()
                .await?
        }
        Commands::List { dir } => {
            client
                .get(format!("{base}/listFiles"))
                .query(&[("dirPath", dir)])
                .send()
                .await?
        }
        Commands::Delete { path } => {
            client
                .delete(format!("{base}/deleteFile"))
                .query(&[("filePath", path)])
                .send()
                .await?
        }
        Commands::Generate { dir, size_mb } => {
            client
                .post(format!("{base}/generateFiles"))
                .form(&[("dirPath", dir), ("sizeInMB", size_mb.to_string())])
                .send()
                .await?
        }
        Commands::Proxy {
            target,
            method,
            headers,
            data,
            timeout,
        } => {
            let mut request = ForwardRequest::new(target);
            request.method = Some(method);
            request.headers = Some(parse_headers(&headers)?);
            request.body = data;
            request.timeout = timeout;

            client
                .post(format!("{base}/proxy"))
                .json(&request)
                .send()
                .await?
        }
    };

    print_response(res).await
}

fn parse_headers(raw: &[String]) -> Result<BTreeMap<String, Vec<String>>, String> {
    let mut headers: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for line in raw {
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| format!("header '{line}' is not in 'Name: value' form"))?;
        headers
            .entry(name.trim().to_string())
            .or_default()
            .push(value.trim().to_string());
    }
    Ok(headers)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
