//! Receipt assembly from a validated form

use bigdecimal::ToPrimitive;

use crate::format::{amount_in_words, format_date, iso_date, or_na};
use crate::traits::{SubmissionFee, SubmissionPayload};
use crate::types::*;

impl Receipt {
    /// Assemble a receipt from a form that already passed validation
    ///
    /// Only valid fee lines are carried over. The form's school contact, when
    /// present, replaces the profile's configured contact.
    pub fn from_form(
        number: ReceiptNumber,
        school: &SchoolProfile,
        form: &ReceiptForm,
    ) -> ReceiptResult<Self> {
        let fees = form.valid_fee_items();
        let total = form.total();
        let amount_in_words = amount_in_words(&total)?;

        let contact = match form.school_contact.trim() {
            "" => school.contact.clone(),
            contact => Some(contact.to_string()),
        };

        Ok(Self {
            number,
            school: SchoolProfile {
                contact,
                ..school.clone()
            },
            receipt_date: form.receipt_date,
            academic_session: form.academic_session.trim().to_string(),
            student: form.student.clone(),
            payment: form.payment.clone(),
            fees,
            total,
            amount_in_words,
        })
    }

    /// Display-formatted record for the archive
    pub fn to_record(&self) -> ReceiptRecord {
        ReceiptRecord {
            receipt_number: self.number.to_string(),
            receipt_date: format_date(self.receipt_date),
            academic_session: self.academic_session.clone(),
            student_name: self.student.name.clone(),
            dob: format_date(self.student.dob),
            gender: or_na(&self.student.gender),
            father_name: or_na(&self.student.father_name),
            mother_name: or_na(&self.student.mother_name),
            class_section: self.student.class_section.clone(),
            payment_mode: self.payment.mode.clone(),
            transaction_id: or_na(&self.payment.transaction_id),
            payment_date: format_date(self.payment.date),
            fees: self
                .fees
                .iter()
                .map(|item| RecordFee {
                    fee_type: item.fee_type.label().to_string(),
                    period: item.period.clone(),
                    amount: item.amount.clone(),
                })
                .collect(),
            total_amount: self.total.clone(),
        }
    }

    /// Flat record for the remote endpoint; raw values, ISO dates
    pub fn to_payload(&self) -> SubmissionPayload {
        SubmissionPayload {
            receipt_number: self.number.to_string(),
            receipt_date: iso_date(self.receipt_date),
            academic_session: self.academic_session.clone(),
            student_name: self.student.name.clone(),
            dob: iso_date(self.student.dob),
            gender: self.student.gender.clone(),
            father_name: self.student.father_name.clone(),
            mother_name: self.student.mother_name.clone(),
            class_section: self.student.class_section.clone(),
            payment_mode: self.payment.mode.clone(),
            transaction_id: self.payment.transaction_id.clone(),
            payment_date: iso_date(self.payment.date),
            fees: self
                .fees
                .iter()
                .map(|item| SubmissionFee {
                    fee_type: item.fee_type.label().to_string(),
                    period: item.period.clone(),
                    amount: item.amount.to_f64().unwrap_or_default(),
                })
                .collect(),
        }
    }
}
