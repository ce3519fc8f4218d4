//! Plain-text printable receipt

use std::fmt;

use crate::format::{format_date, format_money, or_na};
use crate::types::*;

const WIDTH: usize = 64;

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(WIDTH);
        let thin = "-".repeat(WIDTH);

        writeln!(f, "{}", rule)?;
        writeln!(f, "{:^WIDTH$}", self.school.name)?;
        writeln!(f, "{:^WIDTH$}", self.school.address)?;
        if let Some(contact) = self.school.contact.as_deref().filter(|c| !c.is_empty()) {
            writeln!(f, "{:^WIDTH$}", format!("Tel: {}", contact))?;
        }
        writeln!(f, "{:^WIDTH$}", "FEE RECEIPT")?;
        writeln!(f, "{}", rule)?;

        writeln!(
            f,
            "Receipt No: {:<20} Date: {}",
            self.number.to_string(),
            format_date(self.receipt_date)
        )?;
        writeln!(f, "Session:    {}", self.academic_session)?;
        writeln!(f, "{}", thin)?;

        writeln!(f, "Student Name:    {}", self.student.name)?;
        writeln!(f, "Date of Birth:   {}", format_date(self.student.dob))?;
        writeln!(f, "Gender:          {}", or_na(&self.student.gender))?;
        writeln!(f, "Father's Name:   {}", or_na(&self.student.father_name))?;
        writeln!(f, "Mother's Name:   {}", or_na(&self.student.mother_name))?;
        writeln!(f, "Class / Section: {}", self.student.class_section)?;
        writeln!(f, "{}", thin)?;

        writeln!(f, "{:<5} {:<20} {:<20} {:>15}", "S.No", "Fee Type", "Month / Period", "Amount")?;
        for item in &self.fees {
            writeln!(
                f,
                "{:<5} {:<20} {:<20} {:>15}",
                item.serial,
                item.fee_type.label(),
                or_na(&item.period),
                format!("₹ {}", format_money(&item.amount))
            )?;
        }
        writeln!(f, "{}", thin)?;
        writeln!(f, "{:>47} {:>15}", "Total:", format!("₹ {}", format_money(&self.total)))?;
        writeln!(f, "Amount in Words: {} Rupees Only", self.amount_in_words)?;
        writeln!(f, "{}", thin)?;

        writeln!(f, "Payment Mode:    {}", self.payment.mode)?;
        writeln!(f, "Transaction ID:  {}", or_na(&self.payment.transaction_id))?;
        writeln!(f, "Payment Date:    {}", format_date(self.payment.date))?;
        write!(f, "{}", rule)
    }
}
