//! Prompts for the shipment field extraction call.

/// System instruction for every extraction request.
pub const EXTRACTION_SYSTEM_PROMPT: &str = "You are a precise data extraction assistant for \
ocean shipping documents such as bills of lading, commercial invoices and packing lists. \
You read the supplied document text and answer with a single JSON object and nothing else.";

/// User prompt template. `{documents}` is replaced with the flattened
/// document text.
pub const EXTRACTION_USER_PROMPT: &str = r#"Extract the following fields for an Ocean Shipment Form from the documents below.

Fields:
- bill_of_lading_number: the Bill of Lading (B/L) number
- container_number: the shipping container number
- consignee_name: the name of the consignee
- consignee_address: the full address of the consignee
- date_of_export: the date of export, formatted as YYYY-MM-DD
- line_items_count: the number of line items shipped, as a number
- average_gross_weight: the average gross weight per line item, as a number
- average_price: the average price per line item, as a number

Respond with exactly this JSON object and these keys:
{
  "bill_of_lading_number": string or null,
  "container_number": string or null,
  "consignee_name": string or null,
  "consignee_address": string or null,
  "date_of_export": string or null,
  "line_items_count": number or null,
  "average_gross_weight": number or null,
  "average_price": number or null
}

Use null for any field that cannot be found in the documents. Do not guess.

Documents:

{documents}"#;

pub fn build_extraction_prompt(documents: &str) -> String {
    EXTRACTION_USER_PROMPT.replace("{documents}", documents)
}
