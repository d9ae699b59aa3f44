use std::{env, process};

use glext_generator::ExtensionSet;

const LOG_ENV: &str = "GLEXTGEN_LOG";

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        // stdout belongs to the usage message.
        eprintln!(
            "{level:<5} {file}:{line} > {text}",
            level = record.level(),
            file = record.file().unwrap_or_else(|| record.target()),
            line = record
                .line()
                .map_or_else(|| "??".to_string(), |line| line.to_string()),
            text = record.args(),
        );
    }

    fn flush(&self) {}
}

// quiet unless something is off, GLEXTGEN_LOG=info tells what was written.
fn log_level(var: Option<&str>) -> log::LevelFilter {
    var.and_then(|var| var.parse().ok())
        .unwrap_or(log::LevelFilter::Warn)
}

#[test]
fn test_log_level() {
    assert_eq!(log_level(None), log::LevelFilter::Warn);
    assert_eq!(log_level(Some("bogus")), log::LevelFilter::Warn);
    assert_eq!(log_level(Some("info")), log::LevelFilter::Info);
    assert_eq!(log_level(Some("TRACE")), log::LevelFilter::Trace);
}

impl Logger {
    fn init() {
        let level = log_level(env::var(LOG_ENV).ok().as_deref());
        if log::set_logger(&Logger).is_ok() {
            log::set_max_level(level);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let [_, extensions_path, generate_path] = args.as_slice() else {
        let program = args.first().map_or("glextgen", String::as_str);
        println!("usage : {program} extensions_file generate_path");
        process::exit(-1);
    };

    Logger::init();

    let set = ExtensionSet::read(extensions_path)?;
    let generated = glext_generator::generate(&set, generate_path)?;
    log::info!(
        "generated {} extensions into {} and {}",
        set.len(),
        generated.header.display(),
        generated.inline.display(),
    );

    Ok(())
}
