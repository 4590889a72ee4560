/// Moves the user to another view after a successful mutation.
pub trait Navigator: Send + Sync {
  fn navigate(&self, route: &str);
}

/// Detail route for a trigger, e.g. `/dashboard/triggers/{id}`.
pub fn trigger_route(prefix: &str, trigger_id: impl std::fmt::Display) -> String {
  format!("{}/{}", prefix.trim_end_matches('/'), trigger_id)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_trigger_route() {
    assert_eq!(trigger_route("/dashboard/triggers", "X"), "/dashboard/triggers/X");
    assert_eq!(trigger_route("/triggers/", 7), "/triggers/7");
  }
}
