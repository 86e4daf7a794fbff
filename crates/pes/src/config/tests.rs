use super::*;

#[test]
fn config() {
    let got = Config::load("testfiles/pes.toml").unwrap();
    let want = Config {
        plot: true,
        outdir: PathBuf::from("plots"),
        width: 640,
        height: 480,
        pitch: 20.0,
        yaw: 300.0,
    };
    assert_eq!(got, want);
}

#[test]
fn empty() {
    let got: Config = toml::from_str("").unwrap();
    assert_eq!(got, Config::default());
}

#[test]
fn builders() {
    let got = Config::default().plot(false).outdir("/tmp");
    assert!(!got.plot);
    assert_eq!(got.outdir, PathBuf::from("/tmp"));
}

#[test]
fn unknown_field() {
    let got = Config::load("testfiles/typo.toml").unwrap_err();
    assert!(matches!(got, PesError::Config(_)), "{got:?}");
    assert!(got.to_string().contains("widht"), "{got}");
}

#[test]
fn zero_width() {
    let got = Config::load("testfiles/zero.toml").unwrap_err();
    assert!(matches!(got, PesError::Config(_)), "{got:?}");
}

#[test]
fn missing_file() {
    let got = Config::load("testfiles/missing.toml").unwrap_err();
    assert!(matches!(got, PesError::Config(_)), "{got:?}");
}
