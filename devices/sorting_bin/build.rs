fn main() {
    if !std::path::Path::new("cfg.toml").exists() {
        println!(
            "cargo:warning=cfg.toml がありません。cfg.toml.example を元に作成してください (camera_host が未設定だと起動時にエラーになります)"
        );
    }
    println!("cargo:rerun-if-changed=cfg.toml");

    embuild::espidf::sysenv::output();
}
