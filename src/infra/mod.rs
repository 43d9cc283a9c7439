pub mod content_graph;
pub mod http_client;
pub mod id_generator;
pub mod json_output;
