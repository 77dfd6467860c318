mod cli {
    #![allow(non_snake_case)]

    use assert_cmd::prelude::*;
    use mockito::Server;
    use predicates::prelude::PredicateBooleanExt;
    use predicates::str::contains;

    use std::fs;
    use std::path::Path;
    use std::process::Command;
    use tempfile::TempDir;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const NAME: &str = "chanprobe";

    fn channel_cmd(input: &Path, output: &Path) -> Result<Command, Box<dyn std::error::Error>> {
        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.arg(input)
            .arg("-o")
            .arg(output)
            .arg("--no-config")
            .arg("--no-progress");
        Ok(cmd)
    }

    #[test]
    fn test_output__when_no_input_provided() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.assert()
            .failure()
            .code(1)
            .stderr(contains("Error: No input file provided"));
        Ok(())
    }

    #[test]
    fn test_output__when_input_missing() -> TestResult {
        let dir = TempDir::new()?;
        let output = dir.path().join("out.txt");
        let mut cmd = channel_cmd(&dir.path().join("missing.txt"), &output)?;

        cmd.assert()
            .failure()
            .code(1)
            .stderr(contains("File not found"));
        assert!(!output.exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_output__when_some_channels_reachable() -> TestResult {
        let mut server = Server::new_async().await;
        let _m200 = server.mock("GET", "/live").with_status(200).create();
        let _m404 = server.mock("GET", "/gone").with_status(404).create();
        let dir = TempDir::new()?;
        let input = dir.path().join("channels.txt");
        let output = dir.path().join("fastest.txt");
        fs::write(
            &input,
            format!(
                "# channels\nCCTV1,{url}/live$token\nCCTV5,{url}/gone\n\nnot a channel\n",
                url = server.url()
            ),
        )?;
        let mut cmd = channel_cmd(&input, &output)?;

        cmd.assert()
            .success()
            .stdout(contains("Fastest channels (1 of 1 reachable)"))
            .stdout(contains("Probed 2 channel(s): 1 reachable, 1 failed, 0 unsupported"));
        assert_eq!(
            fs::read_to_string(&output)?,
            format!("CCTV1,{}/live\n", server.url())
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_output__reports_every_channel_on_stderr() -> TestResult {
        let mut server = Server::new_async().await;
        let _m200 = server.mock("GET", "/live").with_status(200).create();
        let dir = TempDir::new()?;
        let input = dir.path().join("channels.txt");
        let output = dir.path().join("fastest.txt");
        fs::write(
            &input,
            format!("CCTV1,{url}/live\nCCTV9,{url}/gone\n", url = server.url()),
        )?;
        let mut cmd = Command::cargo_bin(NAME)?;

        // Without a terminal the bar stays hidden
        cmd.arg(&input)
            .arg("-o")
            .arg(&output)
            .arg("--no-config")
            .assert()
            .success()
            .stderr(contains("✓ CCTV1 - "))
            .stderr(contains("✗ CCTV9 - "));
        Ok(())
    }

    #[tokio::test]
    async fn test_output__reports_every_channel_when_no_progress() -> TestResult {
        let mut server = Server::new_async().await;
        let _m500 = server.mock("GET", "/down").with_status(500).create();
        let dir = TempDir::new()?;
        let input = dir.path().join("channels.txt");
        let output = dir.path().join("fastest.txt");
        fs::write(&input, format!("CCTV9,{}/down\n", server.url()))?;
        let mut cmd = channel_cmd(&input, &output)?;

        cmd.assert().success().stderr(contains("✗ CCTV9 - HTTP"));
        Ok(())
    }

    #[tokio::test]
    async fn test_output__when_nothing_reachable() -> TestResult {
        let mut server = Server::new_async().await;
        let _m500 = server.mock("GET", "/down").with_status(500).create();
        let dir = TempDir::new()?;
        let input = dir.path().join("channels.txt");
        let output = dir.path().join("fastest.txt");
        fs::write(&input, format!("CCTV1,{}/down\n", server.url()))?;
        let mut cmd = channel_cmd(&input, &output)?;

        cmd.assert()
            .success()
            .stdout(contains("No reachable channels found"));
        assert_eq!(fs::read_to_string(&output)?, "");
        Ok(())
    }

    #[tokio::test]
    async fn test_output__when_top_limits_written_channels() -> TestResult {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", mockito::Matcher::Regex("^/ch/".to_string()))
            .with_status(200)
            .expect(4)
            .create();
        let dir = TempDir::new()?;
        let input = dir.path().join("channels.txt");
        let output = dir.path().join("fastest.txt");
        let lines: Vec<String> = (1..=4)
            .map(|i| format!("CH{i},{}/ch/{i}", server.url()))
            .collect();
        fs::write(&input, lines.join("\n"))?;
        let mut cmd = channel_cmd(&input, &output)?;

        cmd.args(["-n", "2"]).assert().success();

        let written = fs::read_to_string(&output)?;
        assert_eq!(written.lines().count(), 2);
        assert!(written.lines().all(|line| lines.contains(&line.to_string())));
        Ok(())
    }

    #[tokio::test]
    async fn test_output__when_grouped() -> TestResult {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .create();
        let dir = TempDir::new()?;
        let input = dir.path().join("channels.txt");
        let output = dir.path().join("grouped.txt");
        fs::write(
            &input,
            format!(
                "CCTV5,{url}/a\nCCTV1,{url}/b\nCCTV1,{url}/c\n",
                url = server.url()
            ),
        )?;
        let mut cmd = channel_cmd(&input, &output)?;

        cmd.arg("--grouped").assert().success();

        let written = fs::read_to_string(&output)?;
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "# CCTV1 — 2");
        assert!(lines[1].starts_with("CCTV1,"));
        assert!(lines[2].starts_with("CCTV1,"));
        assert_eq!(lines[3], "# CCTV5 — 1");
        assert_eq!(lines[4], format!("CCTV5,{}/a", server.url()));
        Ok(())
    }

    #[tokio::test]
    async fn test_output__when_unsupported_scheme() -> TestResult {
        let mut server = Server::new_async().await;
        let _m200 = server.mock("GET", "/live").with_status(200).create();
        let dir = TempDir::new()?;
        let input = dir.path().join("channels.txt");
        let output = dir.path().join("fastest.txt");
        fs::write(
            &input,
            format!("Old,ftp://example.com/stream\nNew,{}/live\n", server.url()),
        )?;
        let mut cmd = channel_cmd(&input, &output)?;

        cmd.assert()
            .success()
            .stdout(contains("Probed 1 channel(s): 1 reachable, 0 failed, 1 unsupported"));
        assert_eq!(
            fs::read_to_string(&output)?,
            format!("New,{}/live\n", server.url())
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_output__when_format_json() -> TestResult {
        let mut server = Server::new_async().await;
        let _m200 = server.mock("GET", "/live").with_status(200).create();
        let dir = TempDir::new()?;
        let input = dir.path().join("channels.txt");
        let output = dir.path().join("fastest.txt");
        fs::write(&input, format!("CCTV1,{}/live\n", server.url()))?;
        let mut cmd = channel_cmd(&input, &output)?;

        let assert = cmd.args(["--format", "json"]).assert().success();

        let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
        let json: serde_json::Value = serde_json::from_str(stdout.trim())?;
        assert_eq!(json["status"], "success");
        assert_eq!(json["summary"]["reachable"], 1);
        assert_eq!(json["channels"][0]["name"], "CCTV1");
        assert_eq!(json["channels"][0]["status"], 200);
        Ok(())
    }

    #[tokio::test]
    async fn test_output__when_format_minimal() -> TestResult {
        let mut server = Server::new_async().await;
        let _m200 = server.mock("GET", "/live").with_status(200).create();
        let dir = TempDir::new()?;
        let input = dir.path().join("channels.txt");
        let output = dir.path().join("fastest.txt");
        fs::write(&input, format!("CCTV1,{}/live\n", server.url()))?;
        let mut cmd = channel_cmd(&input, &output)?;

        cmd.args(["--format", "minimal"])
            .assert()
            .success()
            .stdout(contains(format!(" CCTV1 {}/live\n", server.url())));
        Ok(())
    }

    #[test]
    fn test_output__when_quiet() -> TestResult {
        let dir = TempDir::new()?;
        let input = dir.path().join("channels.txt");
        let output = dir.path().join("fastest.txt");
        fs::write(&input, "# nothing to probe\n")?;
        let mut cmd = channel_cmd(&input, &output)?;

        cmd.arg("-q").assert().success().stdout("");
        assert!(output.exists());
        Ok(())
    }

    #[test]
    fn test_output__when_config_invalid() -> TestResult {
        let dir = TempDir::new()?;
        let input = dir.path().join("channels.txt");
        fs::write(&input, "A,http://example.com/a\n")?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg(&input).args(["--no-config", "--timeout", "0"]);

        cmd.assert()
            .failure()
            .code(1)
            .stderr(contains("Timeout cannot be 0"));
        Ok(())
    }

    #[test]
    fn test_output__when_timeout_too_large() -> TestResult {
        let dir = TempDir::new()?;
        let input = dir.path().join("channels.txt");
        fs::write(&input, "A,http://example.com/a\n")?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg(&input).args(["--no-config", "--timeout", "301"]);

        cmd.assert()
            .failure()
            .code(1)
            .stderr(contains("Expected at most 300 seconds"))
            .stderr(contains("Warning").not());
        Ok(())
    }

    #[test]
    fn test_output__when_config_file_used() -> TestResult {
        let dir = TempDir::new()?;
        let input = dir.path().join("channels.txt");
        let output = dir.path().join("from-config.txt");
        let config = dir.path().join("probe.toml");
        fs::write(&input, "")?;
        fs::write(
            &config,
            format!("output_path = {:?}\n", output.display().to_string()),
        )?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg(&input)
            .arg("--config")
            .arg(&config)
            .arg("-q")
            .assert()
            .success();
        assert!(output.exists());
        Ok(())
    }

    #[test]
    fn test_sample__writes_channel_list() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join("sample.txt");
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("sample")
            .arg(&path)
            .assert()
            .success()
            .stdout(contains("Wrote 5 sample channels"));

        let content = fs::read_to_string(&path)?;
        assert!(content.starts_with("CCTV1,http://example.com/cctv1\n"));
        assert_eq!(content.lines().count(), 5);
        Ok(())
    }

    #[test]
    fn test_completion_generate__bash() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.args(["completion-generate", "bash"])
            .assert()
            .success()
            .stdout(contains("chanprobe"));
        Ok(())
    }
}
