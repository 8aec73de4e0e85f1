fn main() {
    // cfg.toml は任意 (なければ既定値を使う)
    println!("cargo:rerun-if-changed=cfg.toml");
    embuild::espidf::sysenv::output();
}
