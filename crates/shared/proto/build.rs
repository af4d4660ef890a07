fn main() -> Result<(), Box<dyn std::error::Error>> {
    // User service proto (served to the auth domain)
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["proto/user.proto"], &["proto/"])?;

    // File service proto (client only)
    tonic_build::configure()
        .build_server(false)
        .build_client(true)
        .compile_protos(&["proto/file.proto"], &["proto/"])?;

    Ok(())
}
