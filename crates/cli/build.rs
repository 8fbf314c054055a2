use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("homedigest")
        .version("1.0.0")
        .author("homedigest contributors")
        .about("Extract property listings from archived email digest pages")
        .arg(clap::arg!(<INPUT>... "Digest pages or directories of pages, or '-' for stdin"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (tsv, json)")
                .value_name("FORMAT")
                .default_value("tsv")
                .value_parser(["tsv", "json"]),
        )
        .arg(clap::arg!(--pretty "Pretty-print JSON output"))
        .arg(clap::arg!(--stats "Print parse statistics to stderr"))
        .arg(clap::arg!(--state <STATE> "State code location patterns accept").default_value("WA"))
        .arg(clap::arg!(--"zip-prefix" <DIGITS> "Leading zip digits location patterns accept").default_value("98"))
        .arg(
            clap::arg!(--"fallback-levels" <NUM> "Levels the fallback walk examines, counting the listing scope")
                .default_value("5"),
        )
        .arg(clap::arg!(--"no-preprocess" "Parse pages exactly as written, without markup cleanup"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "homedigest", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "homedigest", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "homedigest", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "homedigest", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
