// Resume matching and cover letter drafting.
// Pipeline: upload → extraction → prompt → completion service → response parsing.
// Nothing here touches the applications table.

pub mod editor;
pub mod handlers;
pub mod prompts;
pub mod response_parser;
pub mod upload;
