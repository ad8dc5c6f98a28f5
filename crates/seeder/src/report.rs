//! Credential report rendering
//!
//! The seeder ends its run by printing the credentials of every remote
//! server it registered, so developers can paste them into a self-hosted
//! deployment's config.

use uuid::Uuid;

/// Credentials issued to one provisioned remote server
#[derive(Debug, Clone)]
pub struct ServerCredentials {
    pub unique_id: String,
    pub server_uuid: Uuid,
    pub api_key: String,
}

const RULE_WIDTH: usize = 40;

/// Render the credential report: one rule line up front, then each server's
/// identifiers followed by another rule line.
pub fn render(credentials: &[ServerCredentials]) -> String {
    let rule = "-".repeat(RULE_WIDTH);

    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');

    for server in credentials {
        out.push_str(&format!("unique_id: {}\n", server.unique_id));
        out.push_str(&format!("server_uuid: {}\n", server.server_uuid));
        out.push_str(&format!("api_key: {}\n", server.api_key));
        out.push_str(&rule);
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials_for(unique_id: &str) -> ServerCredentials {
        let server_uuid = Uuid::new_v4();
        ServerCredentials {
            unique_id: unique_id.to_string(),
            server_uuid,
            api_key: server_uuid.to_string(),
        }
    }

    #[test]
    fn test_render_empty_report_is_a_single_rule() {
        assert_eq!(render(&[]), format!("{}\n", "-".repeat(40)));
    }

    #[test]
    fn test_render_lists_identifiers_between_rules() {
        let server = credentials_for("legacy-server");
        let rendered = render(&[server.clone()]);

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "-".repeat(40));
        assert_eq!(lines[1], format!("unique_id: {}", server.unique_id));
        assert_eq!(lines[2], format!("server_uuid: {}", server.server_uuid));
        assert_eq!(lines[3], format!("api_key: {}", server.api_key));
        assert_eq!(lines[4], "-".repeat(40));
    }

    #[test]
    fn test_render_separates_servers_with_one_rule() {
        let rendered = render(&[
            credentials_for("legacy-server"),
            credentials_for("business-server"),
        ]);

        let rule_count = rendered
            .lines()
            .filter(|line| *line == "-".repeat(40))
            .count();
        assert_eq!(rule_count, 3);
        assert_eq!(rendered.lines().count(), 9);
    }
}
