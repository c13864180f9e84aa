use reelprice_core::{
    Capability, CatalogPolicy, MovieRecord, Provider, ReelError, TitleIndex,
};

use crate::Reel;
use crate::core::{tag_err, with_request_deadline};
use crate::router::retry::Retrier;
use crate::router::util::collapse_errors;

impl Reel {
    /// Fetch every provider's catalog concurrently and merge them into a title index.
    ///
    /// Each catalog fetch runs under the retry policy. The merged index does
    /// not depend on which provider answered first.
    ///
    /// # Errors
    /// - With `CatalogPolicy::RequireAll`, the failure of any provider.
    /// - With `CatalogPolicy::AllowPartial`, only when every provider failed.
    /// - `RequestTimeout` when the request deadline elapses.
    /// - `InvalidArg` when no registered connector can list a catalog.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "reelprice::catalog::build_index", skip(self))
    )]
    pub async fn build_index(&self) -> Result<TitleIndex, ReelError> {
        with_request_deadline(
            Capability::Index,
            self.cfg.request_timeout,
            self.collect_catalogs(),
        )
        .await?
    }

    async fn collect_catalogs(&self) -> Result<TitleIndex, ReelError> {
        let retrier = Retrier::new(self.cfg.retry);
        let retrier = &retrier;
        let timeout = self.cfg.provider_timeout;

        let tasks: Vec<_> = self
            .connectors
            .iter()
            .filter_map(|c| {
                let cp = c.as_catalog_provider()?;
                let provider = c.provider();
                let name = c.name();
                Some(async move {
                    let res = retrier
                        .retry(Capability::Catalog, || {
                            Self::provider_call_with_timeout(
                                provider,
                                Capability::Catalog,
                                timeout,
                                cp.catalog(),
                            )
                        })
                        .await;
                    (provider, res.map_err(|e| tag_err(name, e)))
                })
            })
            .collect();

        if tasks.is_empty() {
            return Err(ReelError::InvalidArg(
                "no registered connector can list a catalog".to_string(),
            ));
        }

        let mut catalogs: Vec<(Provider, Vec<MovieRecord>)> = Vec::new();
        let mut errors: Vec<ReelError> = Vec::new();
        for (provider, res) in futures::future::join_all(tasks).await {
            match res {
                Ok(records) => catalogs.push((provider, records)),
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(provider = %provider, error = %e, "catalog unavailable");
                    errors.push(e);
                }
            }
        }

        let drop_failed = matches!(self.cfg.catalog_policy, CatalogPolicy::AllowPartial);
        if !errors.is_empty() && (!drop_failed || catalogs.is_empty()) {
            return Err(collapse_errors(errors, None));
        }

        let index = TitleIndex::merge(catalogs);
        #[cfg(feature = "tracing")]
        tracing::debug!(titles = index.len(), "title index built");
        Ok(index)
    }
}
