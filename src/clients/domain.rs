use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;

use super::{Latency, ProviderError, Unconfigured};
use crate::constants::latency;

// ============================================================================
// Payloads
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct BasicInfo {
    pub domain: String,
    pub ip: String,
    pub ssl_status: String,
    pub registration_date: String,
    pub expiration_date: String,
    pub registrar: String,
    pub status: String,
    pub country: String,
    pub organization: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Contact {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WhoisRecord {
    pub registrant: Contact,
    pub admin: Contact,
    pub technical: Contact,
    pub name_servers: Vec<String>,
    pub creation_date: String,
    pub expiration_date: String,
    pub updated_date: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DnsRecord {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    pub ttl: u32,
}

impl DnsRecord {
    fn new(value: impl Into<String>, ttl: u32) -> Self {
        Self {
            value: value.into(),
            priority: None,
            ttl,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DnsRecords {
    pub a: Vec<DnsRecord>,
    pub aaaa: Vec<DnsRecord>,
    pub mx: Vec<DnsRecord>,
    pub ns: Vec<DnsRecord>,
    pub txt: Vec<DnsRecord>,
    pub cname: Vec<DnsRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Subdomain {
    pub name: String,
    pub ip: String,
    pub active: bool,
    pub interesting: bool,
    pub ports: Vec<u16>,
    pub technology: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubdomainStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub interesting: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubdomainReport {
    pub subdomains: Vec<Subdomain>,
    pub stats: SubdomainStats,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnologyStack {
    pub web_server: Vec<String>,
    pub programming: Vec<String>,
    pub database: Vec<String>,
    pub analytics: Vec<String>,
    pub security: Vec<String>,
    pub hosting: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SecurityCheck {
    pub name: String,
    pub description: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SecurityAssessment {
    pub score: u8,
    pub score_class: String,
    pub risk_level: String,
    pub summary: String,
    pub checks: Vec<SecurityCheck>,
}

impl SecurityAssessment {
    fn from_score(score: u8, checks: Vec<SecurityCheck>) -> Self {
        let (score_class, risk_level, summary) = match score {
            80.. => ("good", "low", "Domain has good security posture"),
            60..=79 => ("medium", "medium", "Domain has moderate security issues"),
            _ => ("poor", "high", "Domain has significant security concerns"),
        };

        Self {
            score,
            score_class: score_class.to_string(),
            risk_level: risk_level.to_string(),
            summary: summary.to_string(),
            checks,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Geolocation {
    pub country: String,
    pub region: String,
    pub city: String,
    pub isp: String,
    pub asn: String,
    pub organization: String,
    pub ip_range: String,
    pub hosting_provider: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RelatedDomain {
    pub domain: String,
    pub relationship: String,
    pub last_seen: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RelatedDomains {
    pub similar: Vec<RelatedDomain>,
    pub same_ip: Vec<RelatedDomain>,
    pub same_owner: Vec<RelatedDomain>,
    pub historical: Vec<RelatedDomain>,
}

/// One row of a bulk analysis.
#[derive(Debug, Clone, Serialize)]
pub struct DomainSummary {
    pub domain: String,
    pub ip: String,
    pub status: String,
    pub ssl: String,
    pub registrar: String,
    pub country: String,
    pub security_score: u8,
    pub subdomains: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverviewWhois {
    pub registrar: String,
    pub creation_date: String,
    pub expiration_date: String,
    pub registrant: String,
    pub nameservers: Vec<String>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverviewSubdomain {
    pub name: String,
    pub ip: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverviewDns {
    #[serde(rename = "A")]
    pub a: Vec<String>,
    #[serde(rename = "AAAA")]
    pub aaaa: Vec<String>,
    #[serde(rename = "MX")]
    pub mx: Vec<String>,
    #[serde(rename = "NS")]
    pub ns: Vec<String>,
    #[serde(rename = "TXT")]
    pub txt: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverviewSecurity {
    pub ssl_certificate: String,
    pub security_headers: String,
    pub vulnerabilities: String,
    pub blacklist_status: String,
}

/// Condensed single-call analysis used by the quick tools.
#[derive(Debug, Clone, Serialize)]
pub struct DomainOverview {
    pub domain: String,
    pub whois: OverviewWhois,
    pub subdomains: Vec<OverviewSubdomain>,
    pub dns: OverviewDns,
    pub security: OverviewSecurity,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MailWhois {
    pub registrar: String,
    pub creation_date: String,
    pub expiry_date: String,
}

/// What an email investigation reports about the mailbox's domain.
#[derive(Debug, Clone, Serialize)]
pub struct MailDomainProfile {
    pub whois: MailWhois,
    pub mx_records: Vec<String>,
    pub reputation: String,
}

// ============================================================================
// Trait
// ============================================================================

/// WHOIS, DNS and infrastructure lookups for a domain name.
///
/// Callers validate the domain before asking; implementations treat it as
/// a well-formed hostname.
#[async_trait]
pub trait DomainIntel: Send + Sync {
    async fn basic_info(&self, domain: &str) -> Result<BasicInfo, ProviderError>;

    async fn whois(&self, domain: &str) -> Result<WhoisRecord, ProviderError>;

    async fn dns(&self, domain: &str) -> Result<DnsRecords, ProviderError>;

    async fn subdomains(&self, domain: &str) -> Result<SubdomainReport, ProviderError>;

    async fn technology(&self, domain: &str) -> Result<TechnologyStack, ProviderError>;

    async fn security(&self, domain: &str) -> Result<SecurityAssessment, ProviderError>;

    async fn geolocation(&self, domain: &str) -> Result<Geolocation, ProviderError>;

    async fn related(&self, domain: &str) -> Result<RelatedDomains, ProviderError>;

    async fn summary(&self, domain: &str) -> Result<DomainSummary, ProviderError>;

    async fn overview(&self, domain: &str) -> Result<DomainOverview, ProviderError>;

    async fn mail_profile(&self, domain: &str) -> Result<MailDomainProfile, ProviderError>;
}

// ============================================================================
// Demo implementation
// ============================================================================

const COMMON_SUBDOMAINS: &[&str] = &["www", "mail", "ftp", "admin", "api", "blog", "shop", "dev"];
const SUBDOMAIN_PROBE_LIMIT: usize = 6;
const COMMON_PORTS: &[u16] = &[80, 443, 22, 21, 25];
const WEB_SERVERS: &[&str] = &["Apache", "Nginx", "IIS", "Node.js"];

const LOCATIONS: &[(&str, &str, &str)] = &[
    ("United States", "California", "San Francisco"),
    ("Germany", "Hesse", "Frankfurt"),
    ("United Kingdom", "England", "London"),
    ("Singapore", "Central Singapore", "Singapore"),
];

pub struct DemoDomainIntel {
    latency: Latency,
}

impl DemoDomainIntel {
    #[must_use]
    pub const fn new(latency: Latency) -> Self {
        Self { latency }
    }
}

fn pick<R: Rng>(rng: &mut R, items: &[&'static str]) -> &'static str {
    items.choose(rng).copied().unwrap_or_default()
}

fn sample<R: Rng>(rng: &mut R, items: &[&str], max: usize) -> Vec<String> {
    let amount = rng.random_range(0..=max);
    items
        .choose_multiple(rng, amount)
        .map(|s| (*s).to_string())
        .collect()
}

fn contact(name: &str, email: String, organization: Option<&str>, address: Option<&str>) -> Contact {
    Contact {
        name: name.to_string(),
        organization: organization.map(str::to_string),
        email,
        phone: "+1.5551234567".to_string(),
        address: address.map(str::to_string),
    }
}

fn build_whois(domain: &str) -> WhoisRecord {
    WhoisRecord {
        registrant: contact(
            "John Doe",
            format!("admin@{domain}"),
            Some("Example Corp"),
            Some("123 Main St, Anytown, ST 12345, US"),
        ),
        admin: contact("Admin Contact", format!("admin@{domain}"), None, None),
        technical: contact("Tech Contact", format!("tech@{domain}"), None, None),
        name_servers: (1..=3).map(|i| format!("ns{i}.{domain}")).collect(),
        creation_date: "2020-01-15T00:00:00Z".to_string(),
        expiration_date: "2025-01-15T00:00:00Z".to_string(),
        updated_date: "2023-01-15T00:00:00Z".to_string(),
    }
}

fn build_dns(domain: &str) -> DnsRecords {
    DnsRecords {
        a: vec![
            DnsRecord::new("192.168.1.1", 300),
            DnsRecord::new("192.168.1.2", 300),
        ],
        aaaa: vec![DnsRecord::new("2001:db8::1", 300)],
        mx: vec![DnsRecord {
            priority: Some(10),
            ..DnsRecord::new(format!("mail.{domain}"), 3600)
        }],
        ns: vec![
            DnsRecord::new(format!("ns1.{domain}"), 86_400),
            DnsRecord::new(format!("ns2.{domain}"), 86_400),
        ],
        txt: vec![DnsRecord::new("v=spf1 include:_spf.google.com ~all", 300)],
        cname: vec![DnsRecord::new(format!("www.{domain} -> {domain}"), 300)],
    }
}

fn build_subdomains(domain: &str) -> SubdomainReport {
    let mut rng = rand::rng();

    let subdomains: Vec<Subdomain> = COMMON_SUBDOMAINS
        .iter()
        .take(SUBDOMAIN_PROBE_LIMIT)
        .enumerate()
        .map(|(i, sub)| {
            let port_count = rng.random_range(1..=3);
            Subdomain {
                name: format!("{sub}.{domain}"),
                ip: format!("192.168.1.{}", i + 10),
                active: rng.random_bool(0.5),
                interesting: rng.random_bool(0.5),
                ports: COMMON_PORTS
                    .choose_multiple(&mut rng, port_count)
                    .copied()
                    .collect(),
                technology: pick(&mut rng, WEB_SERVERS).to_string(),
            }
        })
        .collect();

    let active = subdomains.iter().filter(|s| s.active).count();
    let stats = SubdomainStats {
        total: subdomains.len(),
        active,
        inactive: subdomains.len() - active,
        interesting: subdomains.iter().filter(|s| s.interesting).count(),
    };

    SubdomainReport { subdomains, stats }
}

fn build_technology() -> TechnologyStack {
    let mut rng = rand::rng();
    TechnologyStack {
        web_server: sample(&mut rng, &["Apache", "Nginx", "IIS", "LiteSpeed"], 2),
        programming: sample(&mut rng, &["PHP", "Python", "Node.js", "Ruby", "Java"], 2),
        database: sample(&mut rng, &["MySQL", "PostgreSQL", "MongoDB", "Redis"], 2),
        analytics: sample(
            &mut rng,
            &["Google Analytics", "Adobe Analytics", "Hotjar"],
            2,
        ),
        security: sample(&mut rng, &["Cloudflare", "Let's Encrypt", "reCAPTCHA"], 2),
        hosting: sample(
            &mut rng,
            &["AWS", "Google Cloud", "Azure", "DigitalOcean"],
            2,
        ),
    }
}

fn build_security() -> SecurityAssessment {
    let mut rng = rand::rng();

    let checks = [
        (
            "SSL/TLS Configuration",
            "SSL certificate is valid and properly configured",
            &["pass", "fail", "warn"][..],
        ),
        (
            "HTTP Security Headers",
            "Security headers are properly implemented",
            &["pass", "warn"][..],
        ),
        (
            "DNS Security",
            "DNS configuration follows security best practices",
            &["pass", "warn"][..],
        ),
        (
            "Open Ports Scan",
            "No unnecessary ports are exposed",
            &["pass", "warn"][..],
        ),
        (
            "Vulnerability Scan",
            "No known vulnerabilities detected",
            &["pass", "fail"][..],
        ),
    ]
    .into_iter()
    .map(|(name, description, outcomes)| SecurityCheck {
        name: name.to_string(),
        description: description.to_string(),
        status: pick(&mut rng, outcomes).to_string(),
    })
    .collect();

    SecurityAssessment::from_score(rng.random_range(60..=95), checks)
}

fn build_geolocation() -> Geolocation {
    let mut rng = rand::rng();
    let (country, region, city) = LOCATIONS
        .choose(&mut rng)
        .copied()
        .unwrap_or(LOCATIONS[0]);

    Geolocation {
        country: country.to_string(),
        region: region.to_string(),
        city: city.to_string(),
        isp: "Example ISP Inc.".to_string(),
        asn: format!("AS{}", rng.random_range(10_000..=99_999)),
        organization: "Example Hosting Organization".to_string(),
        ip_range: "192.168.0.0/24".to_string(),
        hosting_provider: "Cloud Provider Inc.".to_string(),
    }
}

fn build_related(domain: &str) -> RelatedDomains {
    let mut rng = rand::rng();
    let (base, tld) = domain.split_once('.').unwrap_or((domain, ""));
    let today = Utc::now();

    let mut entries = |relationship: &str, domains: Vec<String>| -> Vec<RelatedDomain> {
        domains
            .into_iter()
            .map(|d| RelatedDomain {
                domain: d,
                relationship: relationship.to_string(),
                last_seen: (today - ChronoDuration::days(rng.random_range(1..=365)))
                    .format("%Y-%m-%d")
                    .to_string(),
                status: pick(&mut rng, &["active", "inactive"]).to_string(),
            })
            .collect()
    };

    RelatedDomains {
        similar: entries(
            "similar",
            (1..=3).map(|i| format!("{base}{i}.{tld}")).collect(),
        ),
        same_ip: entries(
            "same_ip",
            (1..=2).map(|i| format!("example{i}.com")).collect(),
        ),
        same_owner: entries(
            "same_owner",
            ["shop", "blog", "api"]
                .iter()
                .map(|suffix| format!("{base}-{suffix}.{tld}"))
                .collect(),
        ),
        historical: entries(
            "historical",
            vec![format!("old-{base}.{tld}"), format!("archive-{base}.{tld}")],
        ),
    }
}

fn build_summary(domain: &str) -> DomainSummary {
    let mut rng = rand::rng();
    DomainSummary {
        domain: domain.to_string(),
        ip: format!(
            "192.168.{}.{}",
            rng.random_range(1..=255),
            rng.random_range(1..=255)
        ),
        status: pick(&mut rng, &["online", "offline"]).to_string(),
        ssl: pick(&mut rng, &["valid", "invalid"]).to_string(),
        registrar: pick(&mut rng, &["GoDaddy", "Namecheap", "CloudFlare"]).to_string(),
        country: pick(&mut rng, &["US", "DE", "UK", "SG"]).to_string(),
        security_score: rng.random_range(60..=95),
        subdomains: rng.random_range(5..=25),
    }
}

fn build_overview(domain: &str) -> DomainOverview {
    let subdomains = [
        ("www", "192.168.1.1", "Active"),
        ("mail", "192.168.1.2", "Active"),
        ("ftp", "192.168.1.3", "Active"),
        ("admin", "192.168.1.4", "Potential Risk"),
        ("api", "192.168.1.5", "Active"),
    ]
    .into_iter()
    .map(|(sub, ip, status)| OverviewSubdomain {
        name: format!("{sub}.{domain}"),
        ip: ip.to_string(),
        status: status.to_string(),
    })
    .collect();

    let nameservers = vec!["ns1.example.com".to_string(), "ns2.example.com".to_string()];

    DomainOverview {
        domain: domain.to_string(),
        whois: OverviewWhois {
            registrar: "Example Registrar Inc.".to_string(),
            creation_date: "2020-01-15".to_string(),
            expiration_date: "2025-01-15".to_string(),
            registrant: "Privacy Protected".to_string(),
            nameservers: nameservers.clone(),
            status: "Active".to_string(),
        },
        subdomains,
        dns: OverviewDns {
            a: vec!["192.168.1.1".to_string()],
            aaaa: vec!["2001:db8::1".to_string()],
            mx: vec![format!("mail.{domain}"), format!("mail2.{domain}")],
            ns: nameservers,
            txt: vec!["v=spf1 include:_spf.google.com ~all".to_string()],
        },
        security: OverviewSecurity {
            ssl_certificate: "Valid (Let's Encrypt)".to_string(),
            security_headers: "Partial Implementation".to_string(),
            vulnerabilities: "Low Risk".to_string(),
            blacklist_status: "Clean".to_string(),
        },
        timestamp: Utc::now().to_rfc3339(),
    }
}

#[async_trait]
impl DomainIntel for DemoDomainIntel {
    async fn basic_info(&self, domain: &str) -> Result<BasicInfo, ProviderError> {
        self.latency.simulate(latency::SHORT).await;
        Ok(BasicInfo {
            domain: domain.to_string(),
            ip: "192.168.1.1".to_string(),
            ssl_status: "Valid (TLS 1.3)".to_string(),
            registration_date: "2020-01-15".to_string(),
            expiration_date: "2025-01-15".to_string(),
            registrar: "GoDaddy".to_string(),
            status: "active".to_string(),
            country: "US".to_string(),
            organization: "Example Corp".to_string(),
        })
    }

    async fn whois(&self, domain: &str) -> Result<WhoisRecord, ProviderError> {
        self.latency.simulate(latency::LONG).await;
        Ok(build_whois(domain))
    }

    async fn dns(&self, domain: &str) -> Result<DnsRecords, ProviderError> {
        self.latency.simulate(latency::MEDIUM).await;
        Ok(build_dns(domain))
    }

    async fn subdomains(&self, domain: &str) -> Result<SubdomainReport, ProviderError> {
        self.latency.simulate(latency::SLOW).await;
        Ok(build_subdomains(domain))
    }

    async fn technology(&self, _domain: &str) -> Result<TechnologyStack, ProviderError> {
        self.latency.simulate(latency::LONG).await;
        Ok(build_technology())
    }

    async fn security(&self, _domain: &str) -> Result<SecurityAssessment, ProviderError> {
        self.latency.simulate(latency::SLOW).await;
        Ok(build_security())
    }

    async fn geolocation(&self, _domain: &str) -> Result<Geolocation, ProviderError> {
        self.latency.simulate(latency::MEDIUM).await;
        Ok(build_geolocation())
    }

    async fn related(&self, domain: &str) -> Result<RelatedDomains, ProviderError> {
        self.latency.simulate(latency::LONG).await;
        Ok(build_related(domain))
    }

    async fn summary(&self, domain: &str) -> Result<DomainSummary, ProviderError> {
        self.latency.simulate(latency::SHORT).await;
        Ok(build_summary(domain))
    }

    async fn overview(&self, domain: &str) -> Result<DomainOverview, ProviderError> {
        Ok(build_overview(domain))
    }

    async fn mail_profile(&self, domain: &str) -> Result<MailDomainProfile, ProviderError> {
        Ok(MailDomainProfile {
            whois: MailWhois {
                registrar: "Example Registrar".to_string(),
                creation_date: "2015-03-20".to_string(),
                expiry_date: "2025-03-20".to_string(),
            },
            mx_records: vec![format!("mail.{domain}"), format!("mail2.{domain}")],
            reputation: "clean".to_string(),
        })
    }
}

// ============================================================================
// Offline
// ============================================================================

const WHOIS_PROVIDER: &str = "WHOIS/DNS intelligence";

#[async_trait]
impl DomainIntel for Unconfigured {
    async fn basic_info(&self, _domain: &str) -> Result<BasicInfo, ProviderError> {
        Err(ProviderError::NotConfigured(WHOIS_PROVIDER))
    }

    async fn whois(&self, _domain: &str) -> Result<WhoisRecord, ProviderError> {
        Err(ProviderError::NotConfigured(WHOIS_PROVIDER))
    }

    async fn dns(&self, _domain: &str) -> Result<DnsRecords, ProviderError> {
        Err(ProviderError::NotConfigured(WHOIS_PROVIDER))
    }

    async fn subdomains(&self, _domain: &str) -> Result<SubdomainReport, ProviderError> {
        Err(ProviderError::NotConfigured("Shodan"))
    }

    async fn technology(&self, _domain: &str) -> Result<TechnologyStack, ProviderError> {
        Err(ProviderError::NotConfigured("Shodan"))
    }

    async fn security(&self, _domain: &str) -> Result<SecurityAssessment, ProviderError> {
        Err(ProviderError::NotConfigured("VirusTotal"))
    }

    async fn geolocation(&self, _domain: &str) -> Result<Geolocation, ProviderError> {
        Err(ProviderError::NotConfigured("Shodan"))
    }

    async fn related(&self, _domain: &str) -> Result<RelatedDomains, ProviderError> {
        Err(ProviderError::NotConfigured(WHOIS_PROVIDER))
    }

    async fn summary(&self, _domain: &str) -> Result<DomainSummary, ProviderError> {
        Err(ProviderError::NotConfigured(WHOIS_PROVIDER))
    }

    async fn overview(&self, _domain: &str) -> Result<DomainOverview, ProviderError> {
        Err(ProviderError::NotConfigured(WHOIS_PROVIDER))
    }

    async fn mail_profile(&self, _domain: &str) -> Result<MailDomainProfile, ProviderError> {
        Err(ProviderError::NotConfigured(WHOIS_PROVIDER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_security_thresholds() {
        assert_eq!(SecurityAssessment::from_score(95, vec![]).risk_level, "low");
        assert_eq!(SecurityAssessment::from_score(80, vec![]).score_class, "good");
        assert_eq!(
            SecurityAssessment::from_score(79, vec![]).risk_level,
            "medium"
        );
        assert_eq!(SecurityAssessment::from_score(59, vec![]).score_class, "poor");
    }

    #[test]
    fn test_subdomain_stats_are_consistent() {
        let report = build_subdomains("example.com");
        assert_eq!(report.subdomains.len(), 6);
        assert_eq!(report.stats.total, 6);
        assert_eq!(report.stats.active + report.stats.inactive, 6);
        assert_eq!(report.subdomains[0].name, "www.example.com");
        assert_eq!(report.subdomains[0].ip, "192.168.1.10");
        for sub in &report.subdomains {
            assert!((1..=3).contains(&sub.ports.len()));
        }
    }

    #[test]
    fn test_related_uses_base_and_tld() {
        let related = build_related("acme.co.uk");
        assert_eq!(related.similar[0].domain, "acme1.co.uk");
        assert_eq!(related.same_owner[2].domain, "acme-api.co.uk");
        assert_eq!(related.historical[0].domain, "old-acme.co.uk");
        assert!(related.same_ip.iter().all(|r| r.relationship == "same_ip"));
    }

    #[test]
    fn test_technology_serializes_camel_case() {
        let json = serde_json::to_value(build_technology()).unwrap();
        assert!(json.get("webServer").is_some());
        assert!(json["webServer"].as_array().unwrap().len() <= 2);
    }

    #[tokio::test]
    async fn test_whois_mentions_domain() {
        let intel = DemoDomainIntel::new(Latency::disabled());
        let whois = intel.whois("example.org").await.unwrap();
        assert_eq!(whois.registrant.email, "admin@example.org");
        assert_eq!(whois.name_servers.len(), 3);

        let security = intel.security("example.org").await.unwrap();
        assert!((60..=95).contains(&security.score));
        assert_eq!(security.checks.len(), 5);
    }
}
