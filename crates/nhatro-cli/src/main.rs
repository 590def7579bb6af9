// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod runtime;

use anyhow::{Context, Result};
use config::Config;
use nhatro_app::AppState;
use nhatro_store::Store;
use nhatro_tui::UiOptions;
use runtime::StoreRuntime;
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `nhatro --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let store = Store::open_memory().context("open store")?;
    store.bootstrap()?;
    if config.seed_sample_data() && !options.empty {
        store.seed_sample_data()?;
    }

    if options.check_only {
        return Ok(());
    }

    let mut state = AppState {
        active_tab: config.start_tab(),
        ..AppState::default()
    };
    let mut runtime = StoreRuntime::new(&store);
    nhatro_tui::run_app(
        &mut state,
        &mut runtime,
        UiOptions {
            tenants_page_size: config.tenants_page_size(),
            invoices_page_size: config.invoices_page_size(),
            activities_page_size: config.activities_page_size(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    empty: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_example: false,
        empty: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--empty" => {
                options.empty = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("nhatro");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --empty                  Launch without the sample data");
    println!("  --check                  Validate config + store bootstrap, then exit");
    println!("  --help                   Show this help");
}
