use anyhow::{bail, Result};
use bankview_core::{Dashboard, FilterCriteria, OverrideStore, legend, normalize_category_name};
use bankview_core::overrides::merge;
use bankview_finance::assign_category;
use bankview_ingest::{CategoryUpdate, StatementClient};
use clap::Args;
use std::path::Path;
use tracing::{error, info, warn};

use crate::export::export_csv;
use crate::render::{
    Style, render_filter_options, render_legend, render_month_cards, render_stats,
    render_transactions,
};

/// Filter flags shared by list/chart/export.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Month key (YYYY-MM) or "all"
    #[arg(long)]
    pub month: Option<String>,

    /// Case-insensitive text in description, payer/payee or category
    #[arg(long)]
    pub search: Option<String>,

    /// all, income or expense
    #[arg(long = "type")]
    pub txn_type: Option<String>,

    /// Exact category name, or "uncategorized" / "all" (any case)
    #[arg(long)]
    pub category: Option<String>,
}

impl FilterArgs {
    pub fn criteria(&self) -> Result<FilterCriteria> {
        let mut c = FilterCriteria::new();
        if let Some(m) = &self.month {
            c = c.with_month(m.parse()?);
        }
        if let Some(s) = &self.search {
            c = c.with_search(s.clone());
        }
        if let Some(t) = &self.txn_type {
            c = c.with_type(t.parse()?);
        }
        if let Some(cat) = &self.category {
            c = c.with_category(cat.parse()?);
        }
        Ok(c)
    }
}

/// Everything a command needs: backend client, local overrides, output style.
pub struct App {
    pub client: StatementClient,
    pub overrides: OverrideStore,
    pub style: Style,
}

/// A fresh load with local overrides merged in.
pub struct Loaded {
    pub dashboard: Dashboard,
    pub statement_count: Option<u32>,
}

impl App {
    /// Fetch everything and merge overrides. Load failures degrade to `None`.
    pub async fn load(&self) -> Option<Loaded> {
        let all = match self.client.all_transactions().await {
            Ok(all) => all,
            Err(e) => {
                error!(error = %format!("{e:#}"), "failed to load data");
                return None;
            }
        };

        let totals = all.totals();
        let mut transactions = all.transactions;
        let applied = merge(&mut transactions, &self.overrides.load());
        info!(applied, "merged local overrides");

        let mut dashboard = Dashboard::new();
        dashboard.replace_all(transactions, all.monthly_summary, totals);
        Some(Loaded {
            dashboard,
            statement_count: all.statement_count,
        })
    }

    async fn load_or_empty_state(&self) -> Option<Loaded> {
        match self.load().await {
            Some(l) if !l.dashboard.is_empty() => Some(l),
            _ => {
                print_empty_state();
                None
            }
        }
    }

    pub async fn summary(&self) -> Result<()> {
        let Some(loaded) = self.load_or_empty_state().await else {
            return Ok(());
        };
        print_summary(&loaded, &self.style);
        Ok(())
    }

    pub async fn list(&self, filters: &FilterArgs) -> Result<()> {
        let criteria = filters.criteria()?;
        let Some(Loaded { mut dashboard, .. }) = self.load_or_empty_state().await else {
            return Ok(());
        };
        dashboard.set_criteria(criteria);

        print!("{}", render_stats(&dashboard.stats(), &self.style));
        println!();
        print!("{}", render_transactions(&dashboard.filtered(), &self.style));
        Ok(())
    }

    pub async fn chart(&self, filters: &FilterArgs) -> Result<()> {
        let criteria = filters.criteria()?;
        let Some(Loaded { mut dashboard, .. }) = self.load_or_empty_state().await else {
            return Ok(());
        };
        dashboard.set_criteria(criteria);

        println!("Spending by category\n");
        print!("{}", render_legend(&legend(&dashboard.breakdown()), &self.style));
        Ok(())
    }

    pub async fn filters(&self) -> Result<()> {
        let Some(loaded) = self.load_or_empty_state().await else {
            return Ok(());
        };
        print!("{}", render_filter_options(&loaded.dashboard.filter_options()));
        Ok(())
    }

    pub async fn export(&self, out: &Path, filters: &FilterArgs) -> Result<()> {
        let criteria = filters.criteria()?;
        let Some(Loaded { mut dashboard, .. }) = self.load_or_empty_state().await else {
            return Ok(());
        };
        dashboard.set_criteria(criteria);

        let rows = dashboard.filtered();
        export_csv(out, &rows)?;
        println!("Exported {} rows to {}", rows.len(), out.display());
        Ok(())
    }

    /// Save on the backend first; only a successful save touches local state.
    pub async fn categorize(&self, id: &str, raw_category: &str) -> Result<()> {
        let Some(category) = normalize_category_name(raw_category) else {
            bail!("category must not be empty");
        };
        let Some(Loaded { mut dashboard, .. }) = self.load_or_empty_state().await else {
            return Ok(());
        };
        let Some(txn) = dashboard.transaction(id) else {
            println!("No transaction with id {id}");
            return Ok(());
        };

        let update = CategoryUpdate::for_transaction(txn, category.clone());
        if let Err(e) = self.client.save_category(&update).await {
            warn!(id, error = %format!("{e:#}"), "failed to save category; local state unchanged");
            return Ok(());
        }

        let Some(assignment) = assign_category(&mut dashboard, id, &category) else {
            return Ok(());
        };
        self.overrides.record(&assignment.id, &assignment.category);

        println!(
            "{} -> {} (+{} similar)",
            assignment.id,
            assignment.category,
            assignment.propagated.len()
        );
        for other in &assignment.propagated {
            println!("  also {other}");
        }
        println!();
        print!("{}", render_legend(&legend(&dashboard.breakdown()), &self.style));
        Ok(())
    }

    /// Upload a statement, then reload everything.
    pub async fn upload(&self, file: &Path) -> Result<()> {
        if let Err(e) = self.client.upload(file).await {
            eprintln!("Error: {e:#}");
            return Ok(());
        }
        println!("Uploaded {}\n", file.display());
        self.summary().await
    }
}

pub fn print_empty_state() {
    println!("No transactions loaded.");
    println!("Upload a statement: bankview upload <statement.pdf>");
}

pub fn print_summary(loaded: &Loaded, style: &Style) {
    let d = &loaded.dashboard;
    if let Some(n) = loaded.statement_count {
        println!("Statements: {n}");
    }
    println!("Transactions: {}\n", d.transactions().len());
    print!("{}", render_stats(&d.stats(), style));
    println!("\nMonths\n");
    print!("{}", render_month_cards(&d.month_cards(), style));
}
