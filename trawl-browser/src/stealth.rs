//! Anti-detection arguments and scripts for the browser session.

use crate::fingerprint::UserAgentProfile;
use trawl_common::StealthLevel;

/// Construct Chrome command-line arguments for a given stealth level and
/// fingerprint profile.
pub fn build_stealth_arguments(
    level: &StealthLevel,
    profile: &UserAgentProfile,
    headless: bool,
) -> Vec<String> {
    let mut args = vec![
        "--disable-blink-features=AutomationControlled".to_string(),
        "--disable-infobars".to_string(),
        "--disable-dev-shm-usage".to_string(),
        "--no-sandbox".to_string(),
        "--disable-extensions".to_string(),
        "--disable-plugins-discovery".to_string(),
        format!("--user-agent={}", profile.user_agent),
        format!(
            "--window-size={},{}",
            profile.viewport.0, profile.viewport.1
        ),
        format!("--lang={}", profile.languages.join(",")),
    ];
    if headless {
        args.push("--headless".to_string());
        args.push("--disable-gpu".to_string());
    } else if let StealthLevel::Maximum = level {
        args.push("--disable-gpu".to_string());
    }
    args
}

/// JavaScript evasions applied after navigation to reduce automation signals.
pub struct StealthScripts;

impl StealthScripts {
    pub fn core_evasions() -> &'static str {
        r#"
            Object.defineProperty(navigator, 'webdriver', { get: () => undefined });
            Object.defineProperty(navigator, 'plugins', {
                get: () => ({ length: 3, 0: {}, 1: {}, 2: {} })
            });
            Object.defineProperty(navigator, 'languages', { get: () => ['en-US', 'en'] });
            window.chrome = window.chrome || { runtime: {} };
        "#
    }

    pub fn webgl_evasions() -> &'static str {
        r#"
            const origGetParameter = WebGLRenderingContext.prototype.getParameter;
            WebGLRenderingContext.prototype.getParameter = function (p) {
                if (p === 37445) { return 'Intel Inc.'; }
                if (p === 37446) { return 'Intel Iris OpenGL Engine'; }
                return origGetParameter.call(this, p);
            };
        "#
    }

    pub fn canvas_evasions() -> &'static str {
        r#"
            const origGetContext = HTMLCanvasElement.prototype.getContext;
            HTMLCanvasElement.prototype.getContext = function (type, ...rest) {
                const ctx = origGetContext.call(this, type, ...rest);
                if (type === '2d' && ctx) {
                    const origToDataURL = this.toDataURL;
                    this.toDataURL = function (...args) {
                        const img = ctx.getImageData(0, 0, this.width, this.height);
                        for (let i = 0; i < img.data.length; i += 4) {
                            if (Math.random() < 0.001) {
                                img.data[i] += Math.random() < 0.5 ? -1 : 1;
                            }
                        }
                        ctx.putImageData(img, 0, 0);
                        return origToDataURL.apply(this, args);
                    };
                }
                return ctx;
            };
        "#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::UserAgentPool;

    #[test]
    fn arguments_carry_anti_automation_flags_and_session_user_agent() {
        let pool = UserAgentPool::new();
        let profile = pool.pick();
        let args = build_stealth_arguments(&StealthLevel::Balanced, profile, true);

        assert!(args
            .iter()
            .any(|a| a == "--disable-blink-features=AutomationControlled"));
        assert!(args.iter().any(|a| a == "--headless"));
        assert!(args
            .iter()
            .any(|a| a.starts_with("--user-agent=") && a.contains(&profile.user_agent)));
    }
}
