fn main() {
    if !std::path::Path::new("cfg.toml").exists() {
        println!("cargo:warning=cfg.toml が見つかりません。cfg.toml.example をコピーして WiFi 設定を記入してください。");
    }
    println!("cargo:rerun-if-changed=cfg.toml");

    embuild::espidf::sysenv::output();
}
