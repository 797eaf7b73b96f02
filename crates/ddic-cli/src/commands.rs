//! Command execution against a loaded catalog.

use std::process::ExitCode;

use ddic_core::sample::register_patient_schema;
use ddic_core::{
    Catalog, CatalogRepository, ConsistencyValidator, DdlGenerator, EntityKind, WhereUsedAnalyzer,
};
use tracing::{info, warn};

use crate::config::{CliConfig, Command, DdlTarget, ListKind, WhereUsedTarget};
use crate::error::CliError;
use crate::formatter::{create_formatter, Formatter, Listing};

/// Rendered command output and the process status it implies.
#[derive(Debug)]
pub struct Outcome {
    pub output: String,
    pub success: bool,
}

impl Outcome {
    fn ok(output: String) -> Self {
        Self {
            output,
            success: true,
        }
    }

    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> ExitCode {
        if self.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

/// Run a command with the given configuration.
pub fn run(config: &CliConfig, command: Command) -> Result<Outcome, CliError> {
    let repository = CatalogRepository::new(&config.catalog_path);
    let formatter = create_formatter(config.format);

    if let Command::Init { force } = command {
        return init(&repository, force, &*formatter);
    }

    let catalog = open_catalog(&repository, config.bootstrap_sample)?;
    execute(&catalog, &repository, command, &*formatter)
}

/// Load the catalog, falling back to the sample schema or an empty catalog.
fn open_catalog(
    repository: &CatalogRepository,
    bootstrap_sample: bool,
) -> Result<Catalog, CliError> {
    if repository.exists() {
        return Ok(repository.load()?);
    }

    let catalog = Catalog::new();
    if bootstrap_sample {
        register_patient_schema(&catalog)?;
        repository.save(&catalog)?;
        info!(
            path = %repository.storage_path().display(),
            "bootstrapped sample schema"
        );
    } else {
        warn!(
            path = %repository.storage_path().display(),
            "no catalog found, using an empty catalog"
        );
    }
    Ok(catalog)
}

fn init(
    repository: &CatalogRepository,
    force: bool,
    formatter: &dyn Formatter,
) -> Result<Outcome, CliError> {
    if repository.exists() && !force {
        return Err(CliError::Config(format!(
            "catalog already exists at {} (use --force to overwrite)",
            repository.storage_path().display()
        )));
    }

    let catalog = Catalog::new();
    register_patient_schema(&catalog)?;
    repository.save(&catalog)?;

    Ok(Outcome::ok(formatter.format_message(&format!(
        "Initialized sample schema ({} entities) at {}",
        catalog.len(),
        repository.storage_path().display()
    ))))
}

/// Execute a command against an already loaded catalog.
pub fn execute(
    catalog: &Catalog,
    repository: &CatalogRepository,
    command: Command,
    formatter: &dyn Formatter,
) -> Result<Outcome, CliError> {
    match command {
        Command::Validate => {
            let result = ConsistencyValidator::new(catalog).validate();
            Ok(Outcome {
                output: formatter.format_validation(&result),
                success: !result.has_errors(),
            })
        }
        Command::Ddl { target } => ddl(catalog, target, formatter).map(Outcome::ok),
        Command::WhereUsed { target } => where_used(catalog, target, formatter).map(Outcome::ok),
        Command::List { kind } => {
            Ok(Outcome::ok(formatter.format_listing(&listing(catalog, kind))))
        }
        Command::Export { path } => {
            repository.export_to(catalog, &path)?;
            Ok(Outcome::ok(formatter.format_message(&format!(
                "Exported {} entities to {}",
                catalog.len(),
                path.display()
            ))))
        }
        Command::Init { force } => init(repository, force, formatter),
    }
}

fn ddl(
    catalog: &Catalog,
    target: DdlTarget,
    formatter: &dyn Formatter,
) -> Result<String, CliError> {
    match target {
        DdlTarget::Table { name, dialect } => {
            let table = catalog
                .table(&name)
                .ok_or_else(|| CliError::not_found(EntityKind::Table, &name))?;
            let sql = DdlGenerator::generate_create_table(&table, dialect)?;
            Ok(formatter.format_ddl(&name, dialect, &sql))
        }
        DdlTarget::View { name, dialect } => {
            let view = catalog
                .view(&name)
                .ok_or_else(|| CliError::not_found(EntityKind::View, &name))?;
            let sql = DdlGenerator::generate_create_view(&view, dialect)?;
            Ok(formatter.format_ddl(&name, dialect, &sql))
        }
    }
}

fn where_used(
    catalog: &Catalog,
    target: WhereUsedTarget,
    formatter: &dyn Formatter,
) -> Result<String, CliError> {
    // Unknown names report no usages; dangling references still show up.
    let analyzer = WhereUsedAnalyzer::new(catalog);
    let (name, usages) = match target {
        WhereUsedTarget::Domain { name } => {
            let usages = analyzer.all_usages_of_domain(&name);
            (name, usages)
        }
        WhereUsedTarget::DataElement { name } => {
            let usages = analyzer.usages_of_data_element(&name);
            (name, usages)
        }
        WhereUsedTarget::Table { name } => {
            let usages = analyzer.usages_of_table(&name);
            (name, usages)
        }
    };
    Ok(formatter.format_usages(&name, &usages))
}

fn listing(catalog: &Catalog, kind: ListKind) -> Listing {
    let reader = catalog.read();
    match kind {
        ListKind::Domains => {
            let mut listing = Listing::new(vec![
                "Name",
                "Type",
                "Length",
                "Decimals",
                "Fixed values",
                "Description",
            ]);
            for domain in reader.domains() {
                let length = if domain.data_type().is_length_bound() {
                    domain.length().to_string()
                } else {
                    String::new()
                };
                listing.push(vec![
                    domain.name().to_string(),
                    domain.data_type().to_string(),
                    length,
                    domain.decimals().to_string(),
                    domain
                        .value_range()
                        .map(|r| r.fixed_values().join(", "))
                        .unwrap_or_default(),
                    optional(domain.description()),
                ]);
            }
            listing
        }
        ListKind::DataElements => {
            let mut listing = Listing::new(vec!["Name", "Domain", "Medium label", "Long label"]);
            for element in reader.data_elements() {
                listing.push(vec![
                    element.name().to_string(),
                    element.domain().name().to_string(),
                    optional(element.medium_label()),
                    optional(element.long_label()),
                ]);
            }
            listing
        }
        ListKind::Tables => {
            let mut listing = Listing::new(vec![
                "Name",
                "Fields",
                "Key",
                "Delivery class",
                "Buffered",
                "Description",
            ]);
            for table in reader.tables() {
                listing.push(vec![
                    table.name().to_string(),
                    table.fields().len().to_string(),
                    table
                        .key_fields()
                        .map(|f| f.name())
                        .collect::<Vec<_>>()
                        .join(", "),
                    format!("{:?}", table.delivery_class()),
                    table.is_buffered().to_string(),
                    optional(table.description()),
                ]);
            }
            listing
        }
        ListKind::Structures => {
            let mut listing = Listing::new(vec!["Name", "Fields", "Description"]);
            for structure in reader.structures() {
                listing.push(vec![
                    structure.name().to_string(),
                    structure.fields().len().to_string(),
                    optional(structure.description()),
                ]);
            }
            listing
        }
        ListKind::Views => {
            let mut listing = Listing::new(vec!["Name", "Type", "Base tables", "Fields"]);
            for view in reader.views() {
                listing.push(vec![
                    view.name().to_string(),
                    format!("{:?}", view.view_type()),
                    view.base_tables()
                        .iter()
                        .map(|t| t.name())
                        .collect::<Vec<_>>()
                        .join(", "),
                    view.selected_fields().join(", "),
                ]);
            }
            listing
        }
        ListKind::SearchHelps => {
            let mut listing = Listing::new(vec![
                "Name",
                "Selection method",
                "Display fields",
                "Export fields",
            ]);
            for help in reader.search_helps() {
                listing.push(vec![
                    help.name().to_string(),
                    help.selection_method()
                        .map(|t| t.name().to_string())
                        .unwrap_or_default(),
                    help.display_fields().join(", "),
                    help.export_fields().join(", "),
                ]);
            }
            listing
        }
        ListKind::LockObjects => {
            let mut listing =
                Listing::new(vec!["Name", "Primary table", "Secondary tables", "Mode"]);
            for lock in reader.lock_objects() {
                listing.push(vec![
                    lock.name().to_string(),
                    lock.primary_table().name().to_string(),
                    lock.secondary_tables()
                        .iter()
                        .map(|t| t.name())
                        .collect::<Vec<_>>()
                        .join(", "),
                    format!("{:?}", lock.lock_mode()),
                ]);
            }
            listing
        }
    }
}

fn optional(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}
