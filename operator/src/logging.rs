use chrono::Local;
use log::kv::{self, Key, Source, Value, VisitSource};
use log::LevelFilter;

struct KeyValues(String);

impl<'kvs> VisitSource<'kvs> for KeyValues {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), kv::Error> {
        self.0.push_str(&format!(" {}={}", key, value));
        Ok(())
    }
}

/// Renders a record's key/values as ` key=value` pairs.
pub fn render_key_values(source: &dyn Source) -> String {
    let mut rendered = KeyValues(String::new());
    let _ = source.visit(&mut rendered);
    rendered.0
}

pub fn level_from_str(level: Option<&str>) -> LevelFilter {
    match level {
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("warn") => LevelFilter::Warn,
        Some("error") => LevelFilter::Error,
        _ => LevelFilter::Warn,
    }
}

pub fn setup_logging(level: LevelFilter) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}] {}: {}{}",
                Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message,
                render_key_values(record.key_values())
            ))
        })
        .level(level)
        // hyper and tower are chatty at debug
        .level_for("hyper", LevelFilter::Warn)
        .level_for("tower", LevelFilter::Warn)
        .chain(std::io::stderr())
        .apply()?;

    Ok(())
}
