//! Repository aggregation across several accounts.
//!
//! Fetch every account in parallel, merge, drop forks, rank by stars,
//! normalize, cap. Any failure anywhere swaps the whole result for the seed
//! list: there is no per-account partial success.

use std::fmt;

use folio_api::GitHubRepo;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{config::GitHubConfig, models::Project, normalize::normalize, seed, Error, Result};

/// Where repositories come from - makes testing easier and keeps the
/// aggregator independent of the HTTP client.
#[async_trait::async_trait]
pub trait RepositorySource: Send + Sync {
    /// Up to `page_size` repositories for `account`, most recently updated first
    async fn list_repositories(&self, account: &str, page_size: u32) -> Result<Vec<GitHubRepo>>;
}

/// How many ranked projects to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LimitRepr", into = "LimitRepr")]
pub enum Limit {
    Top(usize),
    Unbounded,
}

impl Limit {
    pub fn apply<T>(&self, items: &mut Vec<T>) {
        if let Limit::Top(n) = *self {
            items.truncate(n);
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Top(n) => write!(f, "top {}", n),
            Limit::Unbounded => write!(f, "unbounded"),
        }
    }
}

/// TOML form: `top_n = 9` or `top_n = "unbounded"`
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum LimitRepr {
    Count(usize),
    Keyword(String),
}

impl TryFrom<LimitRepr> for Limit {
    type Error = String;

    fn try_from(repr: LimitRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            LimitRepr::Count(0) => Err("top_n must be at least 1".to_string()),
            LimitRepr::Count(n) => Ok(Limit::Top(n)),
            LimitRepr::Keyword(word) if word.eq_ignore_ascii_case("unbounded") => {
                Ok(Limit::Unbounded)
            }
            LimitRepr::Keyword(word) => Err(format!(
                "top_n must be a positive number or \"unbounded\", got {:?}",
                word
            )),
        }
    }
}

impl From<Limit> for LimitRepr {
    fn from(limit: Limit) -> Self {
        match limit {
            Limit::Top(n) => LimitRepr::Count(n),
            Limit::Unbounded => LimitRepr::Keyword("unbounded".to_string()),
        }
    }
}

/// Whether an [`Aggregation`] holds live data or the seed list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectSource {
    Live,
    Fallback,
}

/// Outcome of one aggregation run. Never mixes live and seed projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    projects: Vec<Project>,
    source: ProjectSource,
    fallback_reason: Option<String>,
}

impl Aggregation {
    pub fn live(projects: Vec<Project>) -> Self {
        Self {
            projects,
            source: ProjectSource::Live,
            fallback_reason: None,
        }
    }

    pub fn fallback(reason: impl Into<String>) -> Self {
        Self {
            projects: seed::seed_projects(),
            source: ProjectSource::Fallback,
            fallback_reason: Some(reason.into()),
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn source(&self) -> ProjectSource {
        self.source
    }

    pub fn is_fallback(&self) -> bool {
        self.source == ProjectSource::Fallback
    }

    /// Why live data was abandoned, if it was
    pub fn fallback_reason(&self) -> Option<&str> {
        self.fallback_reason.as_deref()
    }

    pub fn find(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }
}

/// Drop forks and order by stars, highest first.
///
/// `sort_by` is stable, so equal-star repositories keep their arrival order.
pub fn rank(repos: Vec<GitHubRepo>) -> Vec<GitHubRepo> {
    let mut originals: Vec<GitHubRepo> = repos.into_iter().filter(|r| !r.fork).collect();
    originals.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    originals
}

pub struct Aggregator {
    source: Box<dyn RepositorySource>,
    accounts: Vec<String>,
    page_size: u32,
    limit: Limit,
}

impl Aggregator {
    pub fn new(
        source: Box<dyn RepositorySource>,
        accounts: Vec<String>,
        page_size: u32,
        limit: Limit,
    ) -> Result<Self> {
        if accounts.is_empty() {
            return Err(Error::ConfigError("at least one account is required".into()));
        }
        if let Some(blank) = accounts.iter().find(|a| a.trim().is_empty()) {
            return Err(Error::ConfigError(format!("blank account name {:?}", blank)));
        }
        if page_size == 0 {
            return Err(Error::ConfigError("page_size must be at least 1".into()));
        }
        if limit == Limit::Top(0) {
            return Err(Error::ConfigError("top_n must be at least 1".into()));
        }

        Ok(Self {
            source,
            accounts,
            page_size,
            limit,
        })
    }

    pub fn from_config(source: Box<dyn RepositorySource>, config: &GitHubConfig) -> Result<Self> {
        Self::new(
            source,
            config.accounts.clone(),
            config.page_size,
            config.top_n,
        )
    }

    pub fn accounts(&self) -> &[String] {
        &self.accounts
    }

    /// Run the pipeline and surface the first failure as an error.
    ///
    /// All account requests are awaited before any result is inspected.
    pub async fn try_aggregate(&self) -> Result<Vec<Project>> {
        use futures::future::join_all;

        let fetches: Vec<_> = self
            .accounts
            .iter()
            .map(|account| self.source.list_repositories(account, self.page_size))
            .collect();

        let results = join_all(fetches).await;

        let mut merged = Vec::new();
        for (account, result) in self.accounts.iter().zip(results) {
            let mut repos = result?;
            debug!("{} returned {} repositories", account, repos.len());
            merged.append(&mut repos);
        }

        let ranked = rank(merged);
        let mut projects = ranked.iter().map(normalize).collect::<Result<Vec<_>>>()?;
        self.limit.apply(&mut projects);

        Ok(projects)
    }

    /// Run the pipeline with the fallback policy applied: any error, or an
    /// empty live list, yields the seed projects instead.
    pub async fn aggregate(&self) -> Aggregation {
        match self.try_aggregate().await {
            Ok(projects) if projects.is_empty() => {
                warn!("No live repositories for {:?}, using seed projects", self.accounts);
                Aggregation::fallback("no repositories found")
            }
            Ok(projects) => {
                info!(
                    "Aggregated {} projects from {} accounts ({})",
                    projects.len(),
                    self.accounts.len(),
                    self.limit
                );
                Aggregation::live(projects)
            }
            Err(e) => {
                warn!("Repository aggregation failed, using seed projects: {}", e);
                Aggregation::fallback(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{DEFAULT_DESCRIPTION, REACT_IMAGE, SCRIPT_IMAGE};
    use folio_api::GitHubOwner;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// Canned per-account answers; unknown accounts fail
    struct FakeSource {
        repos: HashMap<String, Vec<GitHubRepo>>,
        calls: Arc<AtomicU32>,
    }

    impl FakeSource {
        fn new(entries: Vec<(&str, Vec<GitHubRepo>)>) -> Self {
            Self {
                repos: entries
                    .into_iter()
                    .map(|(account, repos)| (account.to_string(), repos))
                    .collect(),
                calls: Arc::new(AtomicU32::new(0)),
            }
        }

        fn call_counter(&self) -> Arc<AtomicU32> {
            self.calls.clone()
        }
    }

    #[async_trait::async_trait]
    impl RepositorySource for FakeSource {
        async fn list_repositories(&self, account: &str, page_size: u32) -> Result<Vec<GitHubRepo>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut repos = self
                .repos
                .get(account)
                .cloned()
                .ok_or_else(|| Error::ApiError(format!("Account not found: {}", account)))?;
            repos.truncate(page_size as usize);
            Ok(repos)
        }
    }

    fn repo(id: u64, owner: &str, stars: u32) -> GitHubRepo {
        GitHubRepo {
            id,
            name: format!("repo-{}", id),
            description: None,
            language: None,
            topics: None,
            fork: false,
            stargazers_count: stars,
            html_url: format!("https://github.com/{}/repo-{}", owner, id),
            homepage: None,
            updated_at: "2024-01-15T08:00:00Z".to_string(),
            owner: GitHubOwner {
                login: owner.to_string(),
            },
        }
    }

    fn forked(mut r: GitHubRepo) -> GitHubRepo {
        r.fork = true;
        r
    }

    fn aggregator(source: FakeSource, accounts: &[&str], limit: Limit) -> Aggregator {
        Aggregator::new(
            Box::new(source),
            accounts.iter().map(|a| a.to_string()).collect(),
            10,
            limit,
        )
        .unwrap()
    }

    fn ids(projects: &[Project]) -> Vec<&str> {
        projects.iter().map(|p| p.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_forks_are_excluded() {
        let source = FakeSource::new(vec![
            ("a", vec![repo(1, "a", 5), forked(repo(2, "a", 500))]),
            ("b", vec![forked(repo(3, "b", 50)), repo(4, "b", 1)]),
        ]);
        let agg = aggregator(source, &["a", "b"], Limit::Unbounded).aggregate().await;

        assert_eq!(agg.source(), ProjectSource::Live);
        assert_eq!(ids(agg.projects()), vec!["1", "4"]);
    }

    #[tokio::test]
    async fn test_sorted_by_stars_descending_across_accounts() {
        let source = FakeSource::new(vec![
            ("a", vec![repo(1, "a", 3), repo(2, "a", 30)]),
            ("b", vec![repo(3, "b", 10), repo(4, "b", 300)]),
        ]);
        let projects = aggregator(source, &["a", "b"], Limit::Unbounded)
            .try_aggregate()
            .await
            .unwrap();

        assert_eq!(ids(&projects), vec!["4", "2", "3", "1"]);
    }

    #[tokio::test]
    async fn test_ties_keep_arrival_order() {
        let source = FakeSource::new(vec![
            ("a", vec![repo(1, "a", 5), repo(2, "a", 5)]),
            ("b", vec![repo(3, "b", 5)]),
        ]);
        let projects = aggregator(source, &["a", "b"], Limit::Unbounded)
            .try_aggregate()
            .await
            .unwrap();

        assert_eq!(ids(&projects), vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_truncates_to_top_n() {
        let a: Vec<_> = (1..=8).map(|i| repo(i, "a", i as u32 * 10)).collect();
        let b: Vec<_> = (9..=15).map(|i| repo(i, "b", i as u32 * 10)).collect();
        let source = FakeSource::new(vec![("a", a), ("b", b)]);

        let projects = aggregator(source, &["a", "b"], Limit::Top(9))
            .try_aggregate()
            .await
            .unwrap();

        assert_eq!(projects.len(), 9);
        assert_eq!(
            ids(&projects),
            vec!["15", "14", "13", "12", "11", "10", "9", "8", "7"]
        );
    }

    #[tokio::test]
    async fn test_unbounded_keeps_everything() {
        let a: Vec<_> = (1..=10).map(|i| repo(i, "a", 1)).collect();
        let b: Vec<_> = (11..=20).map(|i| repo(i, "b", 1)).collect();
        let source = FakeSource::new(vec![("a", a), ("b", b)]);

        let projects = aggregator(source, &["a", "b"], Limit::Unbounded)
            .try_aggregate()
            .await
            .unwrap();
        assert_eq!(projects.len(), 20);
    }

    #[tokio::test]
    async fn test_one_failing_account_falls_back_entirely() {
        let source = FakeSource::new(vec![("a", vec![repo(1, "a", 99)])]);
        let agg = aggregator(source, &["a", "missing"], Limit::Top(9))
            .aggregate()
            .await;

        assert!(agg.is_fallback());
        assert_eq!(agg.projects(), seed::seed_projects().as_slice());
        assert!(agg.find("1").map(|p| p.repo_url.contains("Java-Library")).unwrap_or(false));
        assert!(agg.fallback_reason().unwrap().contains("missing"));
    }

    #[tokio::test]
    async fn test_every_account_is_queried_even_when_one_fails() {
        let source = FakeSource::new(vec![("b", vec![repo(1, "b", 1)])]);
        let calls = source.call_counter();
        let aggregator = aggregator(source, &["missing", "b", "c"], Limit::Unbounded);

        assert!(aggregator.try_aggregate().await.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_mapping_failure_falls_back() {
        let mut bad = repo(2, "a", 1);
        bad.name = String::new();
        let source = FakeSource::new(vec![("a", vec![repo(1, "a", 10), bad])]);
        let aggregator = aggregator(source, &["a"], Limit::Top(9));

        assert!(matches!(
            aggregator.try_aggregate().await,
            Err(Error::MappingError { id: 2, .. })
        ));
        assert!(aggregator.aggregate().await.is_fallback());
    }

    #[tokio::test]
    async fn test_mapping_failure_below_the_cap_still_falls_back() {
        // Normalization runs before truncation, so a bad entry ranked 2nd of 2
        // poisons the run even with a cap of 1
        let mut bad = repo(2, "a", 1);
        bad.html_url = String::new();
        let source = FakeSource::new(vec![("a", vec![repo(1, "a", 10), bad])]);

        let agg = aggregator(source, &["a"], Limit::Top(1)).aggregate().await;
        assert!(agg.is_fallback());
    }

    #[tokio::test]
    async fn test_unparseable_date_keeps_live_data() {
        let mut odd = repo(2, "a", 1);
        odd.updated_at = "garbage".to_string();
        let source = FakeSource::new(vec![("a", vec![repo(1, "a", 10), odd])]);

        let agg = aggregator(source, &["a"], Limit::Top(9)).aggregate().await;
        assert!(!agg.is_fallback());
        assert!(agg
            .find("2")
            .map(|p| p.long_description.contains("Invalid Date"))
            .unwrap_or(false));
    }

    #[tokio::test]
    async fn test_empty_live_result_falls_back() {
        let source = FakeSource::new(vec![("a", vec![forked(repo(1, "a", 3))]), ("b", vec![])]);
        let aggregator = aggregator(source, &["a", "b"], Limit::Top(9));

        assert!(aggregator.try_aggregate().await.unwrap().is_empty());
        let agg = aggregator.aggregate().await;
        assert!(agg.is_fallback());
        assert_eq!(agg.fallback_reason(), Some("no repositories found"));
    }

    #[tokio::test]
    async fn test_page_size_is_passed_to_source() {
        let a: Vec<_> = (1..=20).map(|i| repo(i, "a", 1)).collect();
        let source = FakeSource::new(vec![("a", a)]);
        let aggregator =
            Aggregator::new(Box::new(source), vec!["a".into()], 3, Limit::Unbounded).unwrap();

        assert_eq!(aggregator.try_aggregate().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_one_request_per_account() {
        let source = FakeSource::new(vec![("a", vec![]), ("b", vec![])]);
        let calls = source.call_counter();
        aggregator(source, &["a", "b"], Limit::Unbounded).aggregate().await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_normalized_fields_flow_through() {
        let mut ts = repo(1, "a", 2);
        ts.name = "web_app-ui".to_string();
        ts.language = Some("TypeScript".to_string());
        let mut react = repo(2, "a", 1);
        react.language = Some("React".to_string());
        let source = FakeSource::new(vec![("a", vec![ts, react])]);

        let projects = aggregator(source, &["a"], Limit::Unbounded)
            .try_aggregate()
            .await
            .unwrap();

        assert_eq!(projects[0].name, "web app ui");
        assert_eq!(projects[0].image_url, SCRIPT_IMAGE);
        assert_eq!(projects[0].description, DEFAULT_DESCRIPTION);
        assert_eq!(projects[1].image_url, REACT_IMAGE);
    }

    #[test]
    fn test_rejects_bad_settings() {
        let empty = || Box::new(FakeSource::new(vec![])) as Box<dyn RepositorySource>;

        assert!(Aggregator::new(empty(), vec![], 10, Limit::Unbounded).is_err());
        assert!(Aggregator::new(empty(), vec!["  ".into()], 10, Limit::Unbounded).is_err());
        assert!(Aggregator::new(empty(), vec!["a".into()], 0, Limit::Unbounded).is_err());
        assert!(Aggregator::new(empty(), vec!["a".into()], 10, Limit::Top(0)).is_err());
        assert!(Aggregator::new(empty(), vec!["a".into()], 10, Limit::Top(9)).is_ok());
    }

    #[test]
    fn test_rank_filters_and_sorts() {
        let ranked = rank(vec![repo(1, "a", 1), forked(repo(2, "a", 9)), repo(3, "a", 4)]);
        let order: Vec<u64> = ranked.iter().map(|r| r.id).collect();
        assert_eq!(order, vec![3, 1]);
    }

    #[test]
    fn test_limit_serde() {
        #[derive(Deserialize, Serialize)]
        struct Holder {
            top_n: Limit,
        }

        let capped: Holder = toml::from_str("top_n = 9").unwrap();
        assert_eq!(capped.top_n, Limit::Top(9));

        let open: Holder = toml::from_str("top_n = \"unbounded\"").unwrap();
        assert_eq!(open.top_n, Limit::Unbounded);

        assert!(toml::from_str::<Holder>("top_n = 0").is_err());
        assert!(toml::from_str::<Holder>("top_n = \"lots\"").is_err());

        let out = toml::to_string(&Holder { top_n: Limit::Unbounded }).unwrap();
        assert!(out.contains("unbounded"));
    }
}
