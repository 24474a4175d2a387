use chrono::NaiveDate;
use tally_core::{MemoryStore, TransactionType};
use tally_ingest::{import_statement, ImportOutcome, StatementParser};

fn parser() -> StatementParser {
    StatementParser::new(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
}

/// HDFC-style export: narration header, value date column, withdrawal/deposit
/// named as debit/credit, blank trailing lines.
const HDFC_LIKE: &str = "Date,Narration,Chq./Ref.No.,Value Dt,Debit Amount,Credit Amount,Closing Balance\r\n\
01/03/24,UPI-ZOMATO-ORDER,000123,01/03/24,349.00,,10651.00\r\n\
02/03/24,NEFT CREDIT FROM EMPLOYER ACME,000124,02/03/24,,85000.00,95651.00\r\n\
03/03/24,UPI-UBER INDIA,000125,03/03/24,212.40,,95438.60\r\n\
05/03/24,HOUSE RENT MARCH,000126,05/03/24,22000.00,,73438.60\r\n\
06/03/24,INTEREST ADJ,000127,06/03/24,0.00,0.00,73438.60\r\n\
\r\n\
\r\n";

/// Single signed amount column, US month-first dates.
const SIGNED_US: &str = "Posting Date,Description,Amount,Type\n\
01/15/2024,NETFLIX.COM SUBSCRIPTION,-15.49,DEBIT\n\
01/31/2024,PAYROLL SALARY,4200.00,CREDIT\n\
2024-02-03,AMAZON MKTPLACE,-63.20,DEBIT\n\
garbage\n";

#[test]
fn test_swiggy_and_salary_rows() {
    let text = "Date,Description,Debit,Credit\n01/12/2024,SWIGGY ORDER,450,0\n02/12/2024,SALARY CREDIT,0,65000\n";
    let json = serde_json::to_value(parser().parse(text)).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"date":"2024-12-01","description":"SWIGGY ORDER","merchant":"SWIGGY","amount":450.0,"type":"expense","category":"Food & Restaurants"},
            {"date":"2024-12-02","description":"SALARY CREDIT","merchant":"SALARY","amount":65000.0,"type":"income","category":"Salary"}
        ])
    );
}

#[test]
fn test_hdfc_like_export() {
    let preview = parser().preview(HDFC_LIKE);
    // the all-zero interest row is dropped
    assert_eq!(preview.len(), 4);
    assert_eq!(preview.skipped, 1);

    let t = &preview.transactions;
    assert_eq!(t[0].category, "Food & Restaurants");
    assert_eq!(t[0].merchant.as_deref(), Some("UPI-ZOMATO-ORDER"));
    assert_eq!(t[0].date.to_string(), "2024-03-01");
    assert_eq!(t[1].kind, TransactionType::Income);
    assert_eq!(t[1].category, "Salary");
    assert_eq!(t[2].category, "Transport");
    assert_eq!(t[3].category, "Rent");
    assert_eq!(t[3].amount, 22000.0);

    for txn in t {
        assert!(txn.amount >= 0.0);
    }
}

#[test]
fn test_signed_us_export() {
    let txns = parser().parse(SIGNED_US);
    assert_eq!(txns.len(), 3);
    assert_eq!(txns[0].date.to_string(), "2024-01-15");
    assert_eq!(txns[0].kind, TransactionType::Expense);
    assert_eq!(txns[0].category, "Subscriptions");
    assert_eq!(txns[1].date.to_string(), "2024-01-31");
    assert_eq!(txns[1].kind, TransactionType::Income);
    assert_eq!(txns[2].date.to_string(), "2024-02-03");
    assert_eq!(txns[2].category, "Shopping");
}

#[test]
fn test_debit_credit_direction_matches_sign() {
    let preview = parser().preview(HDFC_LIKE);
    for txn in &preview.transactions {
        match txn.kind {
            TransactionType::Income => assert!(txn.description.contains("CREDIT")),
            TransactionType::Expense => assert!(!txn.description.contains("CREDIT")),
        }
    }
}

#[test]
fn test_parsing_is_idempotent() {
    let p = parser();
    let a = serde_json::to_string(&p.parse(HDFC_LIKE)).unwrap();
    let b = serde_json::to_string(&p.parse(HDFC_LIKE)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_unreadable_dates_use_ingestion_date() {
    let txns = parser().parse("Date,Description,Amount\nnot-a-date,UBER TRIP 452,-120\n");
    assert_eq!(txns[0].date.to_string(), "2026-10-18");
    assert_eq!(txns[0].category, "Transport");
    assert_eq!(txns[0].merchant.as_deref(), Some("UBER"));
}

#[tokio::test]
async fn test_import_then_read_back() {
    let store = MemoryStore::new();
    let outcome = import_statement(&parser(), &store, "owner-7", HDFC_LIKE)
        .await
        .unwrap();
    assert_eq!(outcome, ImportOutcome::Imported { parsed: 4, inserted: 4 });

    let saved = store.transactions_for("owner-7").await;
    let income: f64 = saved.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
    assert_eq!(income, 85000.0);
}

#[tokio::test]
async fn test_import_header_only_reports_no_transactions() {
    let store = MemoryStore::new();
    let outcome = import_statement(&parser(), &store, "owner-7", "Date,Description,Debit,Credit\n")
        .await
        .unwrap();
    assert_eq!(outcome, ImportOutcome::NoTransactions);
    assert_eq!(store.total_count().await, 0);
}
