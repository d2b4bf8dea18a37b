pub mod analysis_cmd;
