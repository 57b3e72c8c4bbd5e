use dotenvy::dotenv;
use reqwest::Client;
use serde_json::Value;
use std::env;
use std::path::{Path, PathBuf};

const BASE_URL: &str = "https://api.ucsb.edu/academics/curriculums/v3/classes";

fn is_dry_run() -> bool {
    !env::args().any(|a| a == "--apply")
}

struct Args {
    quarter: String,
    enroll_codes: Vec<String>,
    out_dir: PathBuf,
}

fn parse_args() -> Result<Args, Box<dyn std::error::Error>> {
    let mut positional = Vec::new();
    let mut out_dir = PathBuf::from("potential_classes");

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--apply" => {}
            "--out" => {
                out_dir = args.next().ok_or("--out needs a folder")?.into();
            }
            _ => positional.push(arg),
        }
    }

    if positional.len() < 2 {
        return Err("usage: fetch_class <quarter> <enroll code>... [--out DIR] [--apply]".into());
    }

    let quarter = positional.remove(0);
    Ok(Args {
        quarter,
        enroll_codes: positional,
        out_dir,
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let api_key = env::var("UCSB_API_KEY")?;
    let args = parse_args()?;
    let dry_run = is_dry_run();

    let client = Client::new();

    if !dry_run {
        std::fs::create_dir_all(&args.out_dir)?;
    }

    let mut saved = 0;

    for code in &args.enroll_codes {
        let url = class_url(&args.quarter, code);

        if dry_run {
            println!(
                "[DRY RUN] Would fetch {} -> {}",
                url,
                target_path(&args.out_dir, code).display()
            );
            continue;
        }

        match fetch_class(&client, &api_key, &url).await? {
            Some(data) => {
                let path = target_path(&args.out_dir, code);
                std::fs::write(&path, serde_json::to_string_pretty(&data)?)?;
                println!("✅ Saved {} to {}", code, path.display());
                saved += 1;
            }
            None => println!("❌ No data found for {}", code),
        }
    }

    println!("Classes saved: {} / {}", saved, args.enroll_codes.len());

    Ok(())
}

fn class_url(quarter: &str, enroll_code: &str) -> String {
    format!(
        "{}/{}/{}?includeClassSections=true",
        BASE_URL, quarter, enroll_code
    )
}

fn target_path(out_dir: &Path, enroll_code: &str) -> PathBuf {
    out_dir.join(format!("class_{}.json", enroll_code))
}

async fn fetch_class(
    client: &Client,
    api_key: &str,
    url: &str,
) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let res = client
        .get(url)
        .header("accept", "application/json")
        .header("ucsb-api-key", api_key)
        .send()
        .await?
        .error_for_status()?;

    let data: Value = res.json().await?;

    if data.is_null() {
        return Ok(None);
    }

    Ok(Some(data))
}
