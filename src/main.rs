fn main() -> std::process::ExitCode {
    s3snip_lib::run()
}
