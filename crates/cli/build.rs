use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("folio")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Turn a list of article URLs into Word and PDF documents")
        .arg(clap::arg!([INPUT] "File with one URL per line, or '-' for stdin").default_value("-"))
        .arg(
            clap::arg!(-o --output_dir <DIR> "Directory receiving one sub-directory per run")
                .value_name("DIR")
                .default_value("output")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(--mode <MODE> "Document grouping")
                .value_name("MODE")
                .default_value("per-article")
                .value_parser(["per-article", "combined"]),
        )
        .arg(clap::arg!(--no_filter "Keep boilerplate lines such as newsletter prompts"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout per URL in seconds").default_value("10"))
        .arg(clap::arg!(--user_agent <UA> "Custom User-Agent for HTTP requests").value_name("UA"))
        .arg(clap::arg!(--keep_runs <N> "Keep only the newest N runs in the output directory"))
        .arg(
            clap::arg!(--archive_out <FILE> "Copy the run's archive to FILE")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--json "Print the run summary as JSON on stdout"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "folio", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "folio", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "folio", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "folio", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
