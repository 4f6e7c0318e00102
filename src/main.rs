use journey_flow::api::serve;
use journey_flow::config::Config;
use journey_flow::engine::Engine;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config =
        Config::from_env().expect("invalid proxy configuration, is KAKAO_REST_API_KEY set?");
    let addr = config.listen_addr;

    let engine = Engine::new(config).unwrap();

    serve(engine, addr).await.unwrap();
}
