//! Terminal and JSON rendering of command results

use anyhow::Result;
use console::style;
use domain::entities::{Activity, Company, Contact, Deal};
use domain::{CompanyPerformance, ContactPerformance, DealStage};
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn header(columns: &[(&str, usize)]) {
    let line: Vec<String> = columns
        .iter()
        .map(|(title, width)| format!("{:<width$}", title, width = *width))
        .collect();
    println!("{}", style(line.join(" ")).bold().underlined());
}

fn cell(value: Option<&str>, width: usize) -> String {
    let text = value.unwrap_or("-");
    let mut truncated: String = text.chars().take(width).collect();
    if text.chars().count() > width && width > 1 {
        truncated.pop();
        truncated.push('…');
    }
    format!("{:<width$}", truncated, width = width)
}

pub fn money(value: f64) -> String {
    format!("${:.2}", value)
}

fn date(value: Option<chrono::DateTime<chrono::Utc>>) -> String {
    value
        .map(|ts| ts.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn empty(what: &str) {
    println!("{}", style(format!("No {what} found")).dim());
}

pub fn deals(deals: &[Deal]) {
    if deals.is_empty() {
        return empty("deals");
    }
    header(&[("ID", 6), ("NAME", 28), ("STAGE", 12), ("VALUE", 14), ("CONTACT", 20), ("CREATED", 10)]);
    for deal in deals {
        println!(
            "{:<6} {} {} {:<14} {} {}",
            deal.id,
            cell(deal.name.as_deref(), 28),
            cell(deal.stage.as_ref().map(DealStage::as_str), 12),
            money(deal.value),
            cell(deal.contact_label(), 20),
            date(deal.effective_date()),
        );
    }
}

pub fn deal(deal: &Deal) {
    println!("{} {}", style("●").cyan(), style(deal.name.as_deref().unwrap_or("(unnamed)")).bold());
    println!("  id:        {}", deal.id);
    println!("  stage:     {}", deal.stage.as_ref().map_or("-", DealStage::as_str));
    println!("  value:     {}", money(deal.value));
    println!("  contact:   {}", deal.contact_label().unwrap_or("-"));
    println!("  company:   {}", deal.company_name.as_deref().unwrap_or("-"));
    println!("  created:   {}", date(deal.created_at));
    println!("  stage set: {}", date(deal.stage_updated_at));
    println!("  closes:    {}", date(deal.close_date));
    if let Some(description) = &deal.description {
        println!("  {}", style(description).dim());
    }
}

pub fn pipeline(counts: &[usize; 5]) {
    header(&[("STAGE", 12), ("DEALS", 6)]);
    let widest = counts.iter().copied().max().unwrap_or(0).max(1);
    for (stage, count) in DealStage::PIPELINE.iter().zip(counts) {
        let bar = "█".repeat(count * 30 / widest);
        println!("{:<12} {:<6} {}", stage.as_str(), count, style(bar).cyan());
    }
}

pub fn top_contacts(rows: &[ContactPerformance]) {
    if rows.is_empty() {
        return empty("contacts with deals");
    }
    header(&[("#", 3), ("CONTACT", 24), ("COMPANY", 20), ("TOTAL", 14), ("DEALS", 5)]);
    for (rank, row) in rows.iter().enumerate() {
        println!(
            "{:<3} {} {} {:<14} {:<5}",
            rank + 1,
            cell(Some(&row.name), 24),
            cell(Some(&row.company), 20),
            money(row.total_value),
            row.deal_count
        );
    }
}

pub fn top_companies(rows: &[CompanyPerformance]) {
    if rows.is_empty() {
        return empty("companies with deals");
    }
    header(&[("#", 3), ("COMPANY", 28), ("DEALS", 6), ("TOTAL", 14)]);
    for (rank, row) in rows.iter().enumerate() {
        println!(
            "{:<3} {} {:<6} {}",
            rank + 1,
            cell(Some(&row.company), 28),
            row.opportunity_count,
            money(row.total_value)
        );
    }
}

pub fn contacts(contacts: &[Contact]) {
    if contacts.is_empty() {
        return empty("contacts");
    }
    header(&[("ID", 6), ("NAME", 24), ("EMAIL", 28), ("PHONE", 16), ("COMPANY", 20)]);
    for contact in contacts {
        println!(
            "{:<6} {} {} {} {}",
            contact.id,
            cell(Some(&contact.display_name()), 24),
            cell(contact.email.as_deref(), 28),
            cell(contact.phone.as_deref(), 16),
            cell(contact.company_name.as_deref(), 20),
        );
    }
}

pub fn contact(contact: &Contact) {
    println!("{} {}", style("●").cyan(), style(contact.display_name()).bold());
    println!("  id:           {}", contact.id);
    println!("  email:        {}", contact.email.as_deref().unwrap_or("-"));
    println!("  phone:        {}", contact.phone.as_deref().unwrap_or("-"));
    println!("  company:      {}", contact.company_name.as_deref().unwrap_or("-"));
    println!("  job title:    {}", contact.job_title.as_deref().unwrap_or("-"));
    println!("  last contact: {}", date(contact.last_contact_date));
    if let Some(notes) = &contact.notes {
        println!("  {}", style(notes).dim());
    }
}

pub fn companies(companies: &[Company]) {
    if companies.is_empty() {
        return empty("companies");
    }
    header(&[("ID", 6), ("NAME", 28), ("INDUSTRY", 16), ("EMPLOYEES", 9), ("CONTACTS", 8)]);
    for company in companies {
        println!(
            "{:<6} {} {} {:<9} {:<8}",
            company.id,
            cell(company.name.as_deref(), 28),
            cell(company.industry.as_deref(), 16),
            company.employee_count,
            company.contact_count,
        );
    }
}

pub fn company(company: &Company) {
    println!("{} {}", style("●").cyan(), style(company.name.as_deref().unwrap_or("(unnamed)")).bold());
    println!("  id:        {}", company.id);
    println!("  industry:  {}", company.industry.as_deref().unwrap_or("-"));
    println!("  employees: {}", company.employee_count);
    println!("  contacts:  {}", company.contact_count);
    println!("  website:   {}", company.website.as_deref().unwrap_or("-"));
    println!("  address:   {}", company.address.as_deref().unwrap_or("-"));
}

pub fn activities(activities: &[Activity]) {
    if activities.is_empty() {
        return empty("activities");
    }
    header(&[("ID", 6), ("DATE", 10), ("TYPE", 8), ("TITLE", 32), ("ON", 14), ("DONE", 4)]);
    for activity in activities {
        let target = match (activity.entity(), activity.entity_id) {
            (Some(entity), Some(id)) => format!("{entity} {id}"),
            _ => "-".to_string(),
        };
        let done = if !activity.activity_type.is_task() {
            " "
        } else if activity.completed {
            "✓"
        } else {
            "☐"
        };
        println!(
            "{:<6} {} {} {} {} {}",
            activity.id,
            cell(Some(&date(activity.date)), 10),
            cell(Some(activity.activity_type.as_str()), 8),
            cell(activity.title.as_deref().or(activity.name.as_deref()), 32),
            cell(Some(&target), 14),
            done,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_pads_and_truncates() {
        assert_eq!(cell(Some("abc"), 5), "abc  ");
        assert_eq!(cell(Some("abcdefgh"), 5), "abcd…");
        assert_eq!(cell(None, 3), "-  ");
    }

    #[test]
    fn test_money_has_two_decimals() {
        assert_eq!(money(1234.5), "$1234.50");
        assert_eq!(money(0.0), "$0.00");
    }
}
