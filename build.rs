use std::cmp::Ordering;
use std::env;
use std::process::Command;

// Environment override for the detected level, e.g. for cross builds.
const LEVEL_OVERRIDE: &str = "VECTORLY_SIMD_LEVEL";

// Every cfg this script may emit.
const CFG_FLAGS: [&str; 5] = ["avx512", "avx2", "sse", "neon", "fallback"];

#[derive(PartialEq, Eq, Debug)]
struct CpuFeature {
    name: &'static str,
    cfg_flag: &'static str,
    detected: bool,
}

impl CpuFeature {
    // Lowest number wins
    fn priority(&self) -> usize {
        match self.name {
            "avx512f" => 0,
            "avx2" => 1,
            "sse4_1" => 2,
            "neon" => 3,
            _ => usize::MAX,
        }
    }

    fn features() -> Vec<CpuFeature> {
        [
            ("sse4_1", "sse"),
            ("avx512f", "avx512"),
            ("avx2", "avx2"),
            ("neon", "neon"),
        ]
        .into_iter()
        .map(|(name, cfg_flag)| CpuFeature {
            name,
            cfg_flag,
            detected: false,
        })
        .collect()
    }
}

impl Ord for CpuFeature {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl PartialOrd for CpuFeature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

trait CpuFeatureDetector {
    fn detect_features(&self, features: &mut [CpuFeature]);
    fn is_applicable(&self) -> bool;
}

struct LinuxDetector;
impl CpuFeatureDetector for LinuxDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        if let Ok(cpuinfo) = std::fs::read_to_string("/proc/cpuinfo") {
            let contents = cpuinfo.to_lowercase();
            for feature in features.iter_mut() {
                // aarch64 kernels report NEON as "asimd"
                feature.detected = contents.contains(feature.name)
                    || (feature.name == "neon" && contents.contains("asimd"));
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "linux")
    }
}

struct MacOSDetector;
impl CpuFeatureDetector for MacOSDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        let output = Command::new("sysctl").args(["-a"]).output();

        if let Ok(output) = output {
            let contents = String::from_utf8_lossy(&output.stdout).to_lowercase();

            for feature in features.iter_mut() {
                match feature.name {
                    "avx512f" => feature.detected = contents.contains("hw.optional.avx512f: 1"),
                    "avx2" => feature.detected = contents.contains("hw.optional.avx2_0: 1"),
                    "sse4_1" => feature.detected = contents.contains("hw.optional.sse4_1: 1"),
                    "neon" => feature.detected = contents.contains("hw.optional.neon: 1"),
                    _ => {}
                }
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "macos")
    }
}

// TODO: Windows detector (needs a Windows machine to validate the registry keys)

struct PlatformDetector;
impl PlatformDetector {
    fn cpu_features_detectors() -> Vec<Box<dyn CpuFeatureDetector>> {
        vec![Box::new(LinuxDetector), Box::new(MacOSDetector)]
    }

    fn detect_cpu_features(features: &mut [CpuFeature]) {
        for detector in Self::cpu_features_detectors() {
            if detector.is_applicable() {
                detector.detect_features(features);
                break;
            }
        }
    }

    fn select(features: &mut [CpuFeature]) -> &'static str {
        features.sort();
        features
            .iter()
            .find(|cpu_feature| cpu_feature.detected)
            .map(|cpu_feature| cpu_feature.cfg_flag)
            .unwrap_or("fallback")
    }

    fn apply(cfg_flag: &str) {
        println!("cargo:rustc-cfg={cfg_flag}");
        for flag in CFG_FLAGS {
            println!("cargo::rustc-check-cfg=cfg({flag})");
        }
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed={LEVEL_OVERRIDE}");

    if let Ok(level) = env::var(LEVEL_OVERRIDE) {
        if let Some(flag) = CFG_FLAGS.iter().find(|flag| **flag == level) {
            PlatformDetector::apply(flag);
            return;
        }
        println!("cargo:warning=ignoring unknown {LEVEL_OVERRIDE}={level}");
    }

    let mut features = CpuFeature::features();

    // Detection reads the host CPU, so it only applies to native builds.
    let host = env::var("HOST").unwrap_or_default();
    let target = env::var("TARGET").unwrap_or_default();
    if host == target {
        PlatformDetector::detect_cpu_features(&mut features);
    }

    let cfg_flag = PlatformDetector::select(&mut features);
    PlatformDetector::apply(cfg_flag);
}
