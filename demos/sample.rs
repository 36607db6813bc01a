use appsettings::{AppContext, ConfigError, ConfigReader, FromReader, Settings, SettingsStore};
use chrono::{NaiveDateTime, Utc};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct AppConfig {
    operations: String,
    objects: String,
    code: char,
    index: char,
    enabled: bool,
    enforce: bool,
    max: i32,
    min: i32,
    first_date: NaiveDateTime,
    last_date: NaiveDateTime,
}

impl FromReader for AppConfig {
    fn from_reader<S: SettingsStore>(reader: &ConfigReader<S>) -> Result<Self, ConfigError> {
        let now = Utc::now().naive_utc();

        Ok(Self {
            operations: reader.get_string(
                "Operations",
                "Create|Read|Update|Delete|Assign|Revoke|Enable|Disable",
            ),
            objects: reader.get_string("Objects", "User|Group|Role"),
            code: reader.get_char("Code", 'C')?,
            index: reader.get_char("Index", 'X')?,
            enabled: reader.get_bool("Enabled", true)?,
            enforce: reader.get_bool("Enforce", true)?,
            max: reader.get_value("Max", 1000)?,
            min: reader.get_value("Min", 5)?,
            first_date: reader.get_date_time("FirstDate", now)?,
            last_date: reader.get_date_time("LastDate", now)?,
        })
    }
}

fn main() -> Result<(), appsettings::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Settings resolved once, environment overrides the file
    let settings = Settings::builder()
        .with_file("demos/app.toml", true)
        .with_env("APPSETTINGS", "__")
        .build()?;

    let ctx = AppContext::builder()
        .with_reader(ConfigReader::new(settings))
        .build::<AppConfig>()?;

    let config = ctx.config();

    println!("APPLICATION SETTINGS\n");
    println!("Operations= {}", config.operations);
    println!("Objects   = {}", config.objects);
    println!("Code      = {}", config.code);
    println!("Index     = {}", config.index);
    println!("Max       = {}", config.max);
    println!("Min       = {}", config.min);
    println!("FirstDate = {}", config.first_date);
    println!("LastDate  = {}", config.last_date);
    println!("Enabled   = {}", config.enabled);
    println!("Enforce   = {}", config.enforce);

    println!("\nAPPLICATION SECRETS\n");

    for name in ["Secret1", "Secret2", "Secret3"] {
        let value: String = ctx.reader().get_secret(name)?;
        println!("{name}   = {value}");
    }

    Ok(())
}
