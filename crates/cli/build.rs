use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("hnsift")
        .version(env!("CARGO_PKG_VERSION"))
        .author("hnsift Contributors")
        .about("List the best-scoring stories from a news front page")
        .arg(clap::arg!([INPUT] "Local HTML file or '-' for stdin (default: fetch --url)"))
        .arg(clap::arg!(--url <URL> "Listing URL to fetch when no INPUT is given"))
        .arg(clap::arg!(-p --pages <NUM> "Number of pages to fetch").default_value("1"))
        .arg(clap::arg!(-t --threshold <POINTS> "Minimum score for a story to be listed").default_value("100"))
        .arg(clap::arg!(--unordered "Keep page order instead of sorting by score"))
        .arg(clap::arg!(--ascending "Sort lowest score first"))
        .arg(clap::arg!(--attempts <NUM> "Attempts per page before giving up").default_value("6"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("3"))
        .arg(clap::arg!(--"delay-ms" <MS> "Delay between page requests in milliseconds").default_value("75"))
        .arg(clap::arg!(--"user-agent" <UA> "Custom User-Agent for HTTP requests"))
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (text, json, markdown)")
                .default_value("text")
                .value_parser(["text", "json", "markdown"]),
        )
        .arg(clap::arg!(--keyed "Emit a JSON object keyed by position (JSON only)"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(-v --verbose "Enable debug logging"))
        .arg(
            clap::arg!(--completions <SHELL> "Generate shell completion script")
                .value_parser(["bash", "zsh", "fish", "powershell"]),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "hnsift", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "hnsift", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "hnsift", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "hnsift", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
