//! `atlas` command-line front end
//!
//! The binary is a thin shell over [`build_cli`] and [`run`]; keeping them in
//! the library lets tests drive commands against a temporary data directory.

use anyhow::{bail, Context, Result};
use atlas_core::{
    fill_draft_location, generate_salt, hash_password, AppConfig, AppError, FixedGeolocation,
    ProfileDirectory, StorageBackend,
};
use atlas_map::{HeadlessSurface, Navigator, Route};
use atlas_profile::{ProfileDraft, ProfileId};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// Form fields accepted by `add`, as `(flag, draft field)`
const FORM_FIELDS: &[(&str, &str)] = &[
    ("name", "name"),
    ("email", "email"),
    ("address", "address"),
    ("description", "description"),
    ("phone", "phone"),
    ("photo", "photo"),
    ("interests", "interests"),
    ("lat", "location.lat"),
    ("lng", "location.lng"),
    ("twitter", "socialMedia.twitter"),
    ("linkedin", "socialMedia.linkedin"),
];

fn credential_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("username")
            .long("username")
            .default_value("admin")
            .help("Admin username"),
    )
    .arg(
        Arg::new("password")
            .long("password")
            .required(true)
            .help("Admin password"),
    )
}

/// Command-line definition
#[must_use]
pub fn build_cli() -> Command {
    let mut add = Command::new("add").about("Add a profile (admin)");
    for (flag, _) in FORM_FIELDS {
        add = add.arg(Arg::new(*flag).long(*flag).allow_hyphen_values(true));
    }
    add = add.arg(
        Arg::new("here")
            .long("here")
            .value_name("LAT,LNG")
            .allow_hyphen_values(true)
            .value_parser(value_parser!(FixedGeolocation))
            .help("Fill the location from a fixed device position"),
    );

    Command::new("atlas")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Profile directory with a map view")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("data")
                .long("data")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Directory for the file store (overrides [storage])"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More log output (-v debug, -vv trace); RUST_LOG takes precedence"),
        )
        .subcommand(
            Command::new("list")
                .about("List profiles")
                .arg(
                    Arg::new("search")
                        .long("search")
                        .help("Filter by name, address or description"),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Show one profile as JSON")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(
            Command::new("select")
                .about("Select a profile and print where the map focuses")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(Command::new("markers").about("List map markers"))
        .subcommand(credential_args(add))
        .subcommand(credential_args(
            Command::new("remove")
                .about("Delete a profile (admin)")
                .arg(Arg::new("id").required(true)),
        ))
        .subcommand(credential_args(
            Command::new("reset").about("Replace all profiles with the sample set (admin)"),
        ))
        .subcommand(
            Command::new("hash-password")
                .about("Print an [admin] config section for a password")
                .arg(Arg::new("password").required(true))
                .arg(Arg::new("salt").long("salt").help("Salt (random if omitted)"))
                .arg(
                    Arg::new("username")
                        .long("username")
                        .default_value("admin"),
                ),
        )
}

/// Log level for `-v` repetitions when `RUST_LOG` is unset
#[must_use]
pub fn verbosity_level(count: u8) -> &'static str {
    match count {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Configuration from `--config` and `--data`
///
/// # Errors
/// Fails when the configuration file cannot be loaded
pub fn resolve_config(matches: &ArgMatches) -> Result<AppConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(data) = matches.get_one::<PathBuf>("data") {
        config = config.with_storage(StorageBackend::File, data);
    }
    Ok(config)
}

/// Navigation target printer for the headless map
struct PrintRoute;

impl Navigator for PrintRoute {
    fn navigate(&self, route: Route) {
        tracing::info!(%route, "navigate");
    }
}

fn login(directory: &ProfileDirectory, args: &ArgMatches) -> Result<()> {
    let username = args
        .get_one::<String>("username")
        .map_or("admin", String::as_str);
    let password = args
        .get_one::<String>("password")
        .map_or("", String::as_str);
    directory.session().login(username, password)?;
    Ok(())
}

fn id_arg(args: &ArgMatches) -> ProfileId {
    args.get_one::<String>("id")
        .map(|s| ProfileId::from(s.as_str()))
        .unwrap_or_else(|| ProfileId::from(""))
}

/// Execute a parsed command line, writing results to `out`
///
/// # Errors
/// Any failure to open the directory, authenticate or complete the command
pub async fn run(matches: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    let Some((name, args)) = matches.subcommand() else {
        bail!("no command given");
    };

    if name == "hash-password" {
        let password = args
            .get_one::<String>("password")
            .map_or("", String::as_str);
        let salt = args
            .get_one::<String>("salt")
            .cloned()
            .unwrap_or_else(generate_salt);
        let username = args
            .get_one::<String>("username")
            .map_or("admin", String::as_str);
        writeln!(out, "[admin]")?;
        writeln!(out, "username = {username:?}")?;
        writeln!(out, "salt = {salt:?}")?;
        writeln!(out, "password_sha256 = {:?}", hash_password(&salt, password))?;
        return Ok(());
    }

    let config = resolve_config(matches)?;
    let directory = ProfileDirectory::open(config).context("opening profile directory")?;

    match name {
        "list" => {
            let term = args
                .get_one::<String>("search")
                .map_or("", String::as_str);
            for profile in directory.list(term) {
                writeln!(out, "{}\t{}\t{}", profile.id, profile.name, profile.address)?;
            }
            writeln!(out, "{}", directory.results_label(term))?;
        }
        "show" => {
            let id = id_arg(args);
            let Some(profile) = directory.registry().get(&id) else {
                bail!("no profile with id {id}");
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&profile)?)?;
        }
        "select" => {
            let id = id_arg(args);
            let map = directory.attach_map(Box::new(HeadlessSurface), Arc::new(PrintRoute))?;
            directory.select(Some(id.clone()));
            if map.open_popup().as_ref() == Some(&id) {
                let view = map.viewport();
                writeln!(
                    out,
                    "{id}: {:.4}, {:.4} zoom {}",
                    view.center.lat, view.center.lng, view.zoom
                )?;
            } else {
                writeln!(out, "{id}: not on the map")?;
            }
        }
        "markers" => {
            let map = directory.attach_map(Box::new(HeadlessSurface), Arc::new(PrintRoute))?;
            for marker in map.markers() {
                writeln!(
                    out,
                    "{}\t{:.4}\t{:.4}\t{}",
                    marker.profile_id, marker.position.lat, marker.position.lng, marker.popup.title
                )?;
            }
        }
        "add" => {
            login(&directory, args)?;
            let mut draft = ProfileDraft::new();
            for (flag, field) in FORM_FIELDS {
                if let Some(value) = args.get_one::<String>(flag) {
                    draft
                        .set_field(field, value)
                        .with_context(|| format!("--{flag}"))?;
                }
            }
            if let Some(here) = args.get_one::<FixedGeolocation>("here") {
                fill_draft_location(&mut draft, here, directory.config().geolocation.timeout())
                    .await
                    .map_err(AppError::from)?;
            }
            match directory.admin_panel().submit(&draft) {
                Ok(id) => writeln!(out, "added {id}")?,
                Err(AppError::Validation(errors)) => {
                    for (field, message) in errors.iter() {
                        writeln!(out, "{}: {message}", field.as_str())?;
                    }
                    bail!("profile not added");
                }
                Err(e) => return Err(e.into()),
            }
        }
        "remove" => {
            login(&directory, args)?;
            let id = id_arg(args);
            if !directory.admin_panel().delete(&id)? {
                bail!("no profile with id {id}");
            }
            writeln!(out, "removed {id}")?;
        }
        "reset" => {
            login(&directory, args)?;
            directory.registry().reset_to_samples();
            writeln!(out, "{}", directory.results_label(""))?;
        }
        other => bail!("unknown command {other}"),
    }
    Ok(())
}
