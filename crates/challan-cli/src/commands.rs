//! Command handlers

use std::path::{Path, PathBuf};

use challan_app::app::{summarize, DispatchService};
use challan_app::config::Config;
use challan_app::repository::open_session_repo;
use challan_domain::model::{parse_form_datetime, ItemKind, LoadingSession, LoadingType};
use challan_domain::repository::SessionDraftRepository;
use challan_infra::persistence::FileSessionRepository;
use challan_types::{Error, ExportFormat, OutputFormat, Result};
use chrono::Local;
use tracing::debug;

use crate::cli::{parse_assignment, Cli, Commands, HeaderArgs};
use crate::output::{output_print_report, output_summary};

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let output_format = cli.format.unwrap_or(config.output_format);

    match &cli.command {
        Commands::New {
            header,
            loading_type,
            force,
        } => cmd_new(&config, &cli.draft, header, *loading_type, *force, output_format),

        Commands::SetHeader { header } => {
            edit_draft(&cli.draft, |session| apply_header(session, header))?;
            println!("Header updated: {}", cli.draft.display());
            Ok(())
        }

        Commands::AddItem { kind, values } => cmd_add_item(&cli.draft, *kind, values),

        Commands::UpdateItem { kind, row, values } => {
            cmd_update_item(&cli.draft, *kind, row_index(*row), values)
        }

        Commands::RemoveItem { kind, row } => cmd_remove_item(&cli.draft, *kind, row_index(*row)),

        Commands::SetType { loading_type } => {
            edit_draft(&cli.draft, |session| {
                session.set_loading_type(*loading_type);
                Ok(())
            })?;
            println!("Loading type: {}", loading_type.label());
            Ok(())
        }

        Commands::Show => {
            let session = open_session_repo(cli.draft.clone())?.load()?;
            output_summary(output_format, &summarize(&session))
        }

        Commands::Print { out_dir } => {
            let out_dir = out_dir.clone().unwrap_or_else(|| config.output_dir());
            cmd_print(&config, &cli.draft, &out_dir, output_format)
        }

        Commands::Export {
            out_dir,
            export_format,
        } => {
            let out_dir = out_dir.clone().unwrap_or_else(|| config.output_dir());
            let format = export_format.unwrap_or(config.export_format);
            cmd_export(&config, &cli.draft, &out_dir, format)
        }

        Commands::Config {
            show,
            set_company_name,
            set_company_address,
            set_output_dir,
            set_output,
            set_export,
            reset,
        } => cmd_config(
            *show,
            set_company_name.clone(),
            set_company_address.clone(),
            set_output_dir.clone(),
            *set_output,
            *set_export,
            *reset,
        ),
    }
}

/// Row numbers on screen start at 1
fn row_index(row: u64) -> usize {
    usize::try_from(row.saturating_sub(1)).unwrap_or(usize::MAX)
}

fn open_existing(draft: &Path) -> Result<FileSessionRepository> {
    let repo = open_session_repo(draft.to_path_buf())?;
    if !repo.exists() {
        return Err(Error::FileNotFound(format!(
            "{} (start one with: challan new)",
            draft.display()
        )));
    }
    Ok(repo)
}

/// Load, change and save the draft
fn edit_draft<F>(draft: &Path, edit: F) -> Result<LoadingSession>
where
    F: FnOnce(&mut LoadingSession) -> Result<()>,
{
    let repo = open_existing(draft)?;
    let mut session = repo.load()?;
    edit(&mut session)?;
    repo.save(&session)?;
    debug!(draft = %draft.display(), "draft updated");
    Ok(session)
}

fn apply_header(session: &mut LoadingSession, args: &HeaderArgs) -> Result<()> {
    let header = &mut session.header;

    if let Some(challan) = &args.challan {
        header.challan_no = challan.trim().to_uppercase();
    }
    if let Some(date) = args.date {
        header.date = Some(date);
    }

    let text_fields = [
        (&args.from, &mut header.dispatch_from),
        (&args.to, &mut header.dispatch_to),
        (&args.vehicle, &mut header.vehicle_no),
        (&args.driver, &mut header.driver_name),
        (&args.driver_phone, &mut header.driver_no),
        (&args.transporter, &mut header.transporter_name),
        (&args.lr, &mut header.lr_no),
    ];
    for (arg, field) in text_fields {
        if let Some(value) = arg {
            *field = value.clone();
        }
    }

    if let Some(raw) = &args.vehicle_in {
        header.vehicle_in = parse_time_arg("vehicle in", raw)?;
    }
    if let Some(raw) = &args.vehicle_out {
        header.vehicle_out = parse_time_arg("vehicle out", raw)?;
    }
    Ok(())
}

fn parse_time_arg(what: &str, raw: &str) -> Result<Option<chrono::NaiveDateTime>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_form_datetime(raw).map(Some).ok_or_else(|| {
        Error::InvalidInput(format!(
            "invalid {} time: {} (expected YYYY-MM-DDTHH:MM)",
            what, raw
        ))
    })
}

fn apply_assignments(
    session: &mut LoadingSession,
    kind: ItemKind,
    index: usize,
    values: &[String],
) -> Result<()> {
    for raw in values {
        let (field, value) = parse_assignment(raw).map_err(Error::InvalidInput)?;
        session.update_item(kind, index, field, value);
    }
    Ok(())
}

fn row_count(session: &LoadingSession, kind: ItemKind) -> usize {
    match kind {
        ItemKind::Regular => session.items.len(),
        ItemKind::Grade => session.grade_items.len(),
        ItemKind::Poly => session.poly_items.len(),
    }
}

fn cmd_new(
    config: &Config,
    draft: &Path,
    header: &HeaderArgs,
    loading_type: LoadingType,
    force: bool,
    output_format: OutputFormat,
) -> Result<()> {
    let repo = open_session_repo(draft.to_path_buf())?;
    if repo.exists() && !force {
        return Err(Error::InvalidInput(format!(
            "{} already exists (use --force to start over)",
            draft.display()
        )));
    }

    let today = Local::now().date_naive();
    let mut session = LoadingSession::new(config.company_address.clone(), today);
    session.set_loading_type(loading_type);
    apply_header(&mut session, header)?;
    repo.save(&session)?;

    println!("New loading session: {}", draft.display());
    output_summary(output_format, &summarize(&session))
}

fn cmd_add_item(draft: &Path, kind: ItemKind, values: &[String]) -> Result<()> {
    let mut row = 0;
    edit_draft(draft, |session| {
        let index = session.add_item(kind);
        row = index + 1;
        apply_assignments(session, kind, index, values)
    })?;
    println!("Added {} row {}", kind, row);
    Ok(())
}

fn cmd_update_item(draft: &Path, kind: ItemKind, index: usize, values: &[String]) -> Result<()> {
    edit_draft(draft, |session| {
        let rows = row_count(session, kind);
        if index >= rows {
            return Err(Error::InvalidInput(format!(
                "{} row {} does not exist ({} rows)",
                kind,
                index + 1,
                rows
            )));
        }
        apply_assignments(session, kind, index, values)
    })?;
    println!("Updated {} row {}", kind, index + 1);
    Ok(())
}

fn cmd_remove_item(draft: &Path, kind: ItemKind, index: usize) -> Result<()> {
    let session = edit_draft(draft, |session| {
        session.remove_item(kind, index);
        Ok(())
    })?;
    println!("{} rows left: {}", kind, row_count(&session, kind));
    Ok(())
}

fn cmd_print(config: &Config, draft: &Path, out_dir: &Path, output_format: OutputFormat) -> Result<()> {
    let session = open_existing(draft)?.load()?;
    let service = DispatchService::new(config.profile());

    let report = service.print(&session, out_dir)?;
    output_print_report(output_format, &report)?;

    let failed: Vec<&str> = [("pdf", &report.pdf), ("csv", &report.csv)]
        .into_iter()
        .filter(|(_, outcome)| !outcome.is_written())
        .map(|(name, _)| name)
        .collect();
    if failed.is_empty() {
        Ok(())
    } else {
        Err(Error::OutputFailed(failed.join(", ")))
    }
}

fn cmd_export(config: &Config, draft: &Path, out_dir: &Path, format: ExportFormat) -> Result<()> {
    let session = open_existing(draft)?.load()?;
    let service = DispatchService::new(config.profile());

    let path = service.export(&session, out_dir, format)?;
    println!("Exported to: {}", path.display());
    Ok(())
}

fn cmd_config(
    show: bool,
    set_company_name: Option<String>,
    set_company_address: Option<String>,
    set_output_dir: Option<PathBuf>,
    set_output: Option<OutputFormat>,
    set_export: Option<ExportFormat>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(name) = set_company_name {
        config.company_name = name;
        modified = true;
    }

    if let Some(address) = set_company_address {
        config.company_address = address;
        modified = true;
    }

    if let Some(dir) = set_output_dir {
        config.output_dir = Some(dir);
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(export_format) = set_export {
        config.export_format = export_format;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
