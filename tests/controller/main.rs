mod monitoring;
mod owl;

use std::sync::Arc;

use taxon_owl::{
    app::{self, AppContext},
    tests_cfg::{self, StaticTaxonomy},
    TestServer,
};

pub fn server_with(client: StaticTaxonomy) -> TestServer {
    let ctx = AppContext::with_client(tests_cfg::test_config(), Arc::new(client));
    TestServer::new(app::router(ctx)).expect("start test server")
}
