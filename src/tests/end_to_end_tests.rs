use crate::SiteDump;
use crate::testing::MockFetcher;
use std::collections::BTreeSet;
use std::path::Path;
use tempfile::TempDir;

#[cfg(test)]
mod tests {
    use super::*;

    const HOME: &str = "https://selfcare.example.com/";
    const CARDS: &str = "https://selfcare.example.com/cards";
    const LOANS: &str = "https://selfcare.example.com/loans";
    const MORTGAGE: &str = "https://selfcare.example.com/loans/mortgage";

    fn answer(title: &str) -> String {
        format!(
            r#"<html><body>
                <div id="onetrust-consent-sdk">Accept all</div>
                <header class="header">Bank</header>
                <article><h1>{}</h1></article>
            </body></html>"#,
            title
        )
    }

    /// Two categories: Cards lists three questions directly, Loans only has a
    /// Mortgage section holding two questions.
    fn site() -> MockFetcher {
        let home = format!(
            r#"<html><body>
                <ul class="linkList categories">
                    <li><a href="{}"> Cards </a></li>
                    <li><a href="{}">Loans</a></li>
                </ul>
                <div class="most-asked-question ng-scope"><a href="{}faq/pin">Forgot PIN?</a></div>
            </body></html>"#,
            CARDS, LOANS, HOME
        );
        let cards = format!(
            r#"<html><body><div class="sublevel">
                <a href="{0}/block">Block my card</a>
                <a href="{0}/limit">Change my limit</a>
                <a href="{0}/pin">Forgot PIN?</a>
            </div></body></html>"#,
            CARDS
        );
        let loans = format!(
            r#"<html><body><section class="subject ng-scope">
                <h2><a href="{}">Mortgage</a></h2>
            </section></body></html>"#,
            MORTGAGE
        );
        let mortgage = format!(
            r#"<html><body><div class="sublevel">
                <a href="{0}/rates">Rates</a>
                <a href="{0}/early">Early repayment</a>
            </div></body></html>"#,
            MORTGAGE
        );

        MockFetcher::new()
            .with_page(HOME, home)
            .with_page(CARDS, cards)
            .with_page(LOANS, loans)
            .with_page(MORTGAGE, mortgage)
            .with_page(format!("{}/block", CARDS), answer("Block my card"))
            .with_page(format!("{}/limit", CARDS), answer("Change my limit"))
            .with_page(format!("{}/pin", CARDS), answer("Forgot PIN"))
            .with_page(format!("{}/rates", MORTGAGE), answer("Rates"))
            .with_page(format!("{}/early", MORTGAGE), answer("Early repayment"))
            .with_page(format!("{}faq/pin", HOME), answer("Forgot PIN"))
    }

    fn dump(root: &Path) -> SiteDump {
        SiteDump::new(HOME)
            .with_destination(root)
            .with_settle_delay_ms(0)
            .with_progress(false)
    }

    fn file_names(folder: &Path) -> BTreeSet<String> {
        std::fs::read_dir(folder)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }

    #[tokio::test]
    async fn test_dump_captures_every_question() {
        let root = TempDir::new().unwrap();
        let mut fetcher = site();

        let summary = dump(root.path()).run_with(&mut fetcher).await.unwrap();

        let expected: BTreeSet<String> = [
            "Cards__Block my card.html",
            "Cards__Change my limit.html",
            "Cards__Forgot PIN_.html",
            "Loans_Mortgage_Rates.html",
            "Loans_Mortgage_Early repayment.html",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        assert_eq!(file_names(&root.path().join("Selfcare")), expected);
        assert!(!root.path().join("FAQ").exists());

        assert_eq!(summary.categories, 2);
        assert_eq!(summary.sections, 1);
        assert_eq!(summary.written, 5);
        assert_eq!(summary.skipped_existing, 0);

        let page =
            std::fs::read_to_string(root.path().join("Selfcare/Loans_Mortgage_Rates.html"))
                .unwrap();
        assert!(page.contains("<h1>Rates</h1>"));
        assert!(!page.contains("onetrust-consent-sdk"));
        assert!(!page.contains("<header"));
    }

    #[tokio::test]
    async fn test_second_run_only_revisits_structure() {
        let root = TempDir::new().unwrap();
        let mut fetcher = site();
        let dump = dump(root.path());

        dump.run_with(&mut fetcher).await.unwrap();
        let first_run = fetcher.navigations().len();
        let summary = dump.run_with(&mut fetcher).await.unwrap();

        let second_run = fetcher.navigations()[first_run..].to_vec();
        assert_eq!(second_run, vec![HOME, CARDS, LOANS, MORTGAGE]);
        assert_eq!(summary.written, 0);
        assert_eq!(summary.skipped_existing, 5);
        assert_eq!(file_names(&root.path().join("Selfcare")).len(), 5);
    }

    #[tokio::test]
    async fn test_interrupted_run_resumes_from_disk() {
        let root = TempDir::new().unwrap();
        let selfcare = root.path().join("Selfcare");
        std::fs::create_dir_all(&selfcare).unwrap();
        std::fs::write(selfcare.join("Cards__Block my card.html"), "kept").unwrap();

        let mut fetcher = site();
        let summary = dump(root.path()).run_with(&mut fetcher).await.unwrap();

        assert_eq!(summary.written, 4);
        assert_eq!(summary.skipped_existing, 1);
        assert_eq!(fetcher.navigation_count(&format!("{}/block", CARDS)), 0);
        assert_eq!(
            std::fs::read_to_string(selfcare.join("Cards__Block my card.html")).unwrap(),
            "kept"
        );
    }

    #[tokio::test]
    async fn test_faq_routine_runs_alongside_categories() {
        let root = TempDir::new().unwrap();
        let mut fetcher = site();

        let summary = dump(root.path())
            .with_faq(true)
            .run_with(&mut fetcher)
            .await
            .unwrap();

        let faq = file_names(&root.path().join("FAQ"));
        assert!(faq.contains("index.html"));
        assert!(faq.contains("FAQ__Forgot PIN_.html"));
        assert_eq!(faq.len(), 2);
        assert_eq!(file_names(&root.path().join("Selfcare")).len(), 5);
        assert_eq!(summary.written, 6);
    }

    #[tokio::test]
    async fn test_invalid_target_url_is_rejected() {
        let root = TempDir::new().unwrap();
        let mut fetcher = site();

        let result = SiteDump::new("not a url")
            .with_destination(root.path())
            .run_with(&mut fetcher)
            .await;

        assert!(matches!(result, Err(crate::DumpError::InvalidUrl { .. })));
        assert!(fetcher.navigations().is_empty());
    }
}
