//! Amount-in-words conversion using Indian digit grouping

use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive};

use crate::types::*;

const ONES: [&str; 10] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];

const TEENS: [&str; 10] = [
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const THOUSAND: u64 = 1_000;
const LAKH: u64 = 100_000;
const CRORE: u64 = 10_000_000;

/// Spell out a whole amount, e.g. `150000` becomes `"One Lakh Fifty Thousand"`
///
/// Amounts from a thousand upwards are grouped as Thousand, Lakh and Crore.
/// Counts of a thousand crore or more are themselves spelled with the same
/// grouping, so `10^12` reads `"One Lakh Crore"`.
pub fn to_words(amount: u64) -> String {
    if amount == 0 {
        return "Zero".to_string();
    }

    if amount < THOUSAND {
        return below_thousand(amount);
    }

    if amount < LAKH {
        return with_remainder(
            format!("{} Thousand", below_thousand(amount / THOUSAND)),
            amount % THOUSAND,
        );
    }

    if amount < CRORE {
        return with_remainder(
            format!("{} Lakh", below_thousand(amount / LAKH)),
            amount % LAKH,
        );
    }

    let crores = amount / CRORE;
    let count = if crores < THOUSAND {
        below_thousand(crores)
    } else {
        to_words(crores)
    };
    with_remainder(format!("{} Crore", count), amount % CRORE)
}

/// Spell out the whole-rupee part of a decimal amount
pub fn amount_in_words(amount: &BigDecimal) -> ReceiptResult<String> {
    if *amount < BigDecimal::from(0) {
        return Err(ReceiptError::Validation(format!(
            "Cannot spell out a negative amount: {}",
            amount
        )));
    }

    let whole = amount
        .with_scale_round(0, RoundingMode::Floor)
        .to_u64()
        .ok_or_else(|| {
            ReceiptError::Validation(format!("Amount too large to spell out: {}", amount))
        })?;

    Ok(to_words(whole))
}

/// Words row of a receipt sheet, e.g. `"Two Thousand Rupees Only"`
pub fn rupees_in_words(amount: &BigDecimal) -> ReceiptResult<String> {
    Ok(format!("{} Rupees Only", amount_in_words(amount)?))
}

fn below_thousand(n: u64) -> String {
    match n {
        0 => String::new(),
        1..=9 => ONES[n as usize].to_string(),
        10..=19 => TEENS[(n - 10) as usize].to_string(),
        20..=99 => {
            let tens = TENS[(n / 10) as usize];
            match n % 10 {
                0 => tens.to_string(),
                ones => format!("{} {}", tens, ONES[ones as usize]),
            }
        }
        _ => {
            let head = format!("{} Hundred", ONES[(n / 100) as usize]);
            match n % 100 {
                0 => head,
                rest => format!("{} {}", head, below_thousand(rest)),
            }
        }
    }
}

fn with_remainder(head: String, remainder: u64) -> String {
    if remainder == 0 {
        head
    } else {
        format!("{} {}", head, to_words(remainder))
    }
}
