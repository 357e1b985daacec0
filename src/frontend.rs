pub mod cli;
pub mod experiments;
pub mod recorder;


pub const FLOW_XML_FILENAME: &str = "flow.xml";
