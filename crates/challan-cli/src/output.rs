//! Output formatting module

use challan_app::app::{LoadingSummary, OutputOutcome, PrintReport};
use challan_domain::service::{format_quantity, ChallanTotals, PrimaryTotals};
use challan_types::{OutputFormat, Result};

pub fn output_summary(output_format: OutputFormat, summary: &LoadingSummary) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(summary)?;
        println!("{}", content);
        return Ok(());
    }

    println!("\nLoading Summary");
    println!("===============");
    println!("Challan No:    {}", or_dash(&summary.challan_no));
    println!(
        "Date:          {}",
        summary
            .date
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    println!("Dispatch From: {}", or_dash(&summary.dispatch_from));
    println!("Dispatch To:   {}", or_dash(&summary.dispatch_to));
    println!("Vehicle No:    {}", or_dash(&summary.vehicle_no));
    println!("Loading Type:  {}", summary.loading_type.label());
    println!("Item rows:     {}", summary.item_rows);
    println!("Poly rows:     {}", summary.poly_rows);

    print_totals(&summary.totals);

    if summary.is_printable() {
        println!("\nReady to print");
    } else {
        println!("\nMissing: {}", summary.missing.join(", "));
    }
    Ok(())
}

pub fn output_print_report(output_format: OutputFormat, report: &PrintReport) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(report)?;
        println!("{}", content);
        return Ok(());
    }

    println!("\nChallan {}", report.challan_no);
    println!("==============================");
    print_totals(&report.totals);
    println!();
    println!("PDF: {}", describe(&report.pdf));
    println!("CSV: {}", describe(&report.csv));
    Ok(())
}

fn print_totals(totals: &ChallanTotals) {
    println!("\n--- Totals ---");
    match &totals.primary {
        PrimaryTotals::Regular {
            total_cartons,
            estimated_weight_kg,
        } => {
            println!("Total cartons: {}", format_quantity(*total_cartons));
            match estimated_weight_kg {
                Some(kg) => println!("Est. weight:   {} KG", format_quantity(*kg)),
                None => println!("Est. weight:   -"),
            }
        }
        PrimaryTotals::Grade {
            total_bags,
            total_kgs,
        } => {
            println!("Total bags:    {}", format_quantity(*total_bags));
            println!("Total KGs:     {}", format_quantity(*total_kgs));
        }
    }
    if let Some(poly) = &totals.poly {
        println!(
            "Poly KGs:      {} ({} rows)",
            format_quantity(poly.total_kgs),
            poly.rows.len()
        );
    }
}

fn describe(outcome: &OutputOutcome) -> String {
    match outcome {
        OutputOutcome::Written(path) => path.display().to_string(),
        OutputOutcome::Failed(reason) => format!("FAILED ({})", reason),
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
