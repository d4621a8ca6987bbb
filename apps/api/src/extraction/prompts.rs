// All LLM prompt constants for the extraction module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::models::event::EventMode;

/// Persona and output contract shared by every mode.
pub const EXTRACTION_PREAMBLE: &str = r#"You are an assistant that analyzes emails and chat messages for a small business owner.
The message may be written in Korean or English.

From the message, extract:
1. The name of the other party (customer, client or applicant)
2. The date and time of the event
3. A short description of the event

Return a JSON object with EXACTLY these three fields:
{
  "customer_name": "name of the customer / client / applicant, or null",
  "datetime": "YYYY-MM-DD HH:MM, or the date expression as written (e.g. \"내일\", \"12월 25일\"), or null",
  "description": "short description of the event"
}

Never invent a time that is not stated in the message."#;

pub const RECRUIT_INSTRUCTION: &str = "MODE: Recruiting\n\
    Extract the applicant's name and the interview date/time.";

pub const ORDER_INSTRUCTION: &str = "MODE: Ordering / Booking\n\
    Extract the customer's name and the reservation or pickup date/time.";

pub const WORK_INSTRUCTION: &str = "MODE: Work\n\
    Extract the client's name and the meeting date/time or work deadline.";

/// Full extraction prompt. Replace: {preamble}, {json_only}, {mode_instruction}, {text}
pub const EXTRACTION_PROMPT_TEMPLATE: &str = r#"{preamble}

{json_only}

{mode_instruction}

Extract the information from the following text:

{text}"#;

/// Mode-specific amendment. Exhaustive over the closed mode set.
pub fn mode_instruction(mode: EventMode) -> &'static str {
    match mode {
        EventMode::Recruit => RECRUIT_INSTRUCTION,
        EventMode::Order => ORDER_INSTRUCTION,
        EventMode::Work => WORK_INSTRUCTION,
    }
}

/// Builds the complete instruction sent to the model for `text` under `mode`.
pub fn build_extraction_prompt(mode: EventMode, text: &str) -> String {
    EXTRACTION_PROMPT_TEMPLATE
        .replace("{preamble}", EXTRACTION_PREAMBLE)
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        .replace("{mode_instruction}", mode_instruction(mode))
        .replace("{text}", text)
}
