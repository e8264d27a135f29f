/// Builds the classification prompt for an already truncated document text.
///
/// `organization` is the user's own business; invoices it issued are
/// outgoing invoices rather than expenses.
pub fn build_prompt(text: &str, organization: Option<&str>) -> String {
    let issuer = organization
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| format!("issued BY {name} (our own business)"))
        .unwrap_or_else(|| "issued BY our own business to a customer".to_string());

    format!(
        r#"Analyze this document and extract information based on its type.

FIRST, determine the document type:
1. "bank_statement" - A bank statement showing account transactions over a period
2. "expense" - A receipt, bill, or invoice FROM another company (expense to be paid/already paid)
3. "outgoing_invoice" - An invoice {issuer}

THEN extract the relevant information:

For BANK STATEMENTS:
- bank_name: The bank's name (e.g., "HSBC", "Barclays", "NatWest")
- start_date: Statement period start date in YYYY-MM-DD format
- end_date: Statement period end date in YYYY-MM-DD format

For EXPENSES:
- vendor: The company that issued the document (use well-known brand names, not legal entities)
  Examples: Use "Uber" not "DECADA OUSADA LDA", "Amazon" not "Amazon EU S.a r.l."
- date: The document date in YYYY-MM-DD format

For OUTGOING INVOICES:
- Just identify it as type "outgoing_invoice"

Return ONLY a JSON object:
{{
  "document_type": "bank_statement" | "expense" | "outgoing_invoice",
  // For bank_statement: "bank_name", "start_date", "end_date"
  // For expense: "vendor", "date"
}}

Document text:
{text}

JSON response:"#
    )
}
