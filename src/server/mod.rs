pub mod api;

use crate::cli::Args;
use crate::error::RadarError;

pub struct Server {
    addr: String,
    args: Args,
}

impl Server {
    pub fn new(addr: String, args: Args) -> Self {
        Self { addr, args }
    }

    pub async fn run(&self) -> Result<(), RadarError> {
        api::start_http_server(&self.addr, self.args.clone()).await
    }
}
