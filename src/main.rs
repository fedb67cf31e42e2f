use region_viewer::ViewerConfig;

fn main() -> anyhow::Result<()> {
    let mut config = ViewerConfig::default();
    if let Some(root) = std::env::args().nth(1) {
        config.asset_root = root;
    }
    region_viewer::run(config)
}
