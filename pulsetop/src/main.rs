//! Entry point for the pulsetop TUI. Parses args and runs the App.

use std::env;
use std::io::{self, Write};
use std::time::Duration;

use pulsetop::api::RemoteClient;
use pulsetop::app::App;
use pulsetop::probe::MetricsProbe;
use pulsetop::profiles::{
    load_profiles, save_profiles, ProfileEntry, ProfileRequest, ResolveProfile,
};
use pulsetop::refresh::RefreshCoordinator;
use pulsetop::store::SyncStore;
use tracing_subscriber::EnvFilter;

const DEFAULT_REFRESH_SECS: u64 = 10;

struct ParsedArgs {
    url: Option<String>,
    profile: Option<String>,
    interval_secs: u64,
    save: bool,
    demo: bool,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "pulsetop".into());
    let mut url: Option<String> = None;
    let mut profile: Option<String> = None;
    let mut interval_secs = DEFAULT_REFRESH_SECS;
    let mut save = false; // --save
    let mut demo = false; // --demo

    let usage = |prog: &str| {
        format!(
            "Usage: {prog} [--profile NAME|-P NAME] [--interval SECS|-i SECS] [--save] [--demo] [http://HOST:PORT]"
        )
    };

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                return Err(usage(&prog));
            }
            "--profile" | "-P" => {
                profile = it.next();
            }
            "--interval" | "-i" => {
                if let Some(v) = it.next() {
                    interval_secs = v
                        .parse::<u64>()
                        .map_err(|_| format!("Invalid --interval value '{v}'. {}", usage(&prog)))?;
                }
            }
            "--save" => {
                save = true;
            }
            "--demo" => {
                demo = true;
            }
            _ if arg.starts_with("--profile=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        profile = Some(v.to_string());
                    }
                }
            }
            _ if arg.starts_with("--interval=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    interval_secs = v
                        .parse::<u64>()
                        .map_err(|_| format!("Invalid --interval value '{v}'. {}", usage(&prog)))?;
                }
            }
            _ => {
                if url.is_none() {
                    url = Some(arg);
                } else {
                    return Err(format!("Unexpected argument. {}", usage(&prog)));
                }
            }
        }
    }
    if interval_secs == 0 {
        return Err(format!("--interval must be at least 1 second. {}", usage(&prog)));
    }
    Ok(ParsedArgs {
        url,
        profile,
        interval_secs,
        save,
        demo,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Reuse the same parsing logic for testability
    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("{msg}");
            return Ok(());
        }
    };

    // Demo mode short-circuit (spawns a local stub service)
    if parsed.demo || matches!(parsed.profile.as_deref(), Some("demo")) {
        return run_demo_mode(parsed.interval_secs).await;
    }

    let profiles_file = load_profiles();
    let req = ProfileRequest {
        profile_name: parsed.profile.clone(),
        url: parsed.url.clone(),
    };
    let resolved = req.resolve(&profiles_file);

    let mut profiles_mut = profiles_file.clone();
    let url: String = match resolved {
        ResolveProfile::Direct(u) => {
            if let Some(name) = parsed.profile.as_ref() {
                match profiles_mut.profiles.get(name) {
                    None => {
                        // New profile: auto-save immediately
                        profiles_mut
                            .profiles
                            .insert(name.clone(), ProfileEntry { url: u.clone() });
                        let _ = save_profiles(&profiles_mut);
                    }
                    Some(entry) => {
                        if entry.url != u {
                            let overwrite = parsed.save
                                || prompt_yes_no(&format!(
                                    "Overwrite existing profile '{name}'? [y/N]: "
                                ));
                            if overwrite {
                                profiles_mut
                                    .profiles
                                    .insert(name.clone(), ProfileEntry { url: u.clone() });
                                let _ = save_profiles(&profiles_mut);
                            }
                        }
                    }
                }
            }
            u
        }
        ResolveProfile::Loaded(u) => u,
        ResolveProfile::PromptSelect(mut names) => {
            // Always offer the demo option
            if !names.iter().any(|n| n == "demo") {
                names.push("demo".into());
            }
            eprintln!("Select profile:");
            for (i, n) in names.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, n);
            }
            eprint!("Enter number (or blank to abort): ");
            let _ = io::stderr().flush();
            let mut line = String::new();
            if io::stdin().read_line(&mut line).is_err() {
                return Ok(());
            }
            let Ok(idx) = line.trim().parse::<usize>() else {
                return Ok(());
            };
            if idx < 1 || idx > names.len() {
                return Ok(());
            }
            let name = &names[idx - 1];
            if name == "demo" {
                return run_demo_mode(parsed.interval_secs).await;
            }
            match profiles_mut.profiles.get(name) {
                Some(entry) => entry.url.clone(),
                None => return Ok(()),
            }
        }
        ResolveProfile::PromptCreate(name) => {
            eprintln!("Profile '{name}' does not exist yet.");
            let url = prompt_string("Enter URL (http://HOST:PORT or https://...): ")?;
            let url = url.trim().to_string();
            if url.is_empty() {
                return Ok(());
            }
            profiles_mut
                .profiles
                .insert(name.clone(), ProfileEntry { url: url.clone() });
            let _ = save_profiles(&profiles_mut);
            url
        }
        ResolveProfile::None => {
            eprintln!("No URL provided and no profiles to select.");
            return Ok(());
        }
    };

    run_dashboard(&url, parsed.interval_secs).await
}

async fn run_dashboard(url: &str, interval_secs: u64) -> anyhow::Result<()> {
    let coordinator = RefreshCoordinator::new(
        RemoteClient::new(url),
        MetricsProbe::sysinfo(),
        SyncStore::open_default(),
    );
    let mut app = App::new(coordinator, Duration::from_secs(interval_secs));
    app.run().await
}

fn prompt_yes_no(prompt: &str) -> bool {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_ok() {
        matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

fn prompt_string(prompt: &str) -> io::Result<String> {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

// --- Demo Mode ---

async fn run_demo_mode(interval_secs: u64) -> anyhow::Result<()> {
    let port = 3939;
    let url = format!("http://127.0.0.1:{port}");
    let guard = spawn_stub_service(port)?;
    let coordinator = RefreshCoordinator::new(
        RemoteClient::new(&url),
        MetricsProbe::sysinfo(),
        SyncStore::open_default(),
    );
    let mut app = App::new(coordinator, Duration::from_secs(interval_secs));
    tokio::select! {
        res = app.run() => { drop(guard); res }
        _ = tokio::signal::ctrl_c() => {
            drop(guard);
            Ok(())
        }
    }
}

struct StubGuard(Option<std::process::Child>);
impl Drop for StubGuard {
    fn drop(&mut self) {
        if let Some(mut ch) = self.0.take() {
            let _ = ch.kill();
        }
    }
}

fn spawn_stub_service(port: u16) -> anyhow::Result<StubGuard> {
    let mut cmd = std::process::Command::new(find_stub_executable());
    cmd.arg("--port").arg(port.to_string());
    let child = cmd.spawn()?;
    // Give the stub a brief moment to bind
    std::thread::sleep(std::time::Duration::from_millis(300));
    Ok(StubGuard(Some(child)))
}

fn find_stub_executable() -> std::path::PathBuf {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(parent) = exe.parent() {
            #[cfg(windows)]
            let name = "pulsetop_stub.exe";
            #[cfg(not(windows))]
            let name = "pulsetop_stub";
            let candidate = parent.join(name);
            if candidate.exists() {
                return candidate;
            }
        }
    }
    // Fall back to PATH
    std::path::PathBuf::from("pulsetop_stub")
}
