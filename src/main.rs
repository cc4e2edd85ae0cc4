use boxsim::{bench_step, run_sandbox, Sandbox, SettingsConfig};

use anyhow::Result;
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Run the stepping benchmark instead of the viewer
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_settings_from_yaml(file_name: &str) -> Result<SettingsConfig> {
    let settings_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("settings")
        .join(file_name);
    let file = File::open(&settings_path)?;
    let reader = BufReader::new(file);
    let settings: SettingsConfig = serde_yaml::from_reader(reader)?;

    Ok(settings)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        bench_step();
        return Ok(());
    }

    let settings = load_settings_from_yaml(&args.file_name)?;
    println!("loaded settings from {}", args.file_name);

    let sandbox = Sandbox::build(&settings);
    run_sandbox(sandbox, &settings.window);

    Ok(())
}
