// ============================================================================
// Table Persistence Module
// ============================================================================
//
// Serialization boundary for the engine:
//
// - **JSON format** (structured, tool-friendly): round-trips column types
//   and the Missing marker losslessly, including categorical level sets.
//   `json`: document structures plus `Table::save_json` / `Table::load_json`.
//
// - **Delimited text export** (human-readable): header row plus formatted
//   values, Missing rendered as an empty field. Export only - parsing
//   delimited text back is the ingestion collaborator's job.
//
// Group metadata is derivation state and is intentionally not persisted;
// re-run group_by after loading.

pub mod delimited;
pub mod json;
